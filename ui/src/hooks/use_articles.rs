use std::rc::Rc;

use bindings::{ListBinding, RequestTicket};
use payloads::{FetchParams, responses::Article};
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::use_fetch::spawn_request;

pub struct ArticlesHookReturn {
    pub articles: Vec<Article>,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Params of the page currently shown (or being fetched).
    pub params: FetchParams,
    pub refetch: Callback<()>,
}

impl ArticlesHookReturn {
    pub fn next_page(&self) -> Option<FetchParams> {
        self.has_next
            .then(|| self.params.clone().with_page(self.params.page + 1))
    }

    pub fn previous_page(&self) -> Option<FetchParams> {
        self.has_previous.then(|| {
            self.params
                .clone()
                .with_page(self.params.page.saturating_sub(1))
        })
    }
}

/// Paginated article list for `params`.
///
/// Every distinct `params` value triggers exactly one request; while it is
/// in flight the previous page stays visible.
#[hook]
pub fn use_articles(params: FetchParams) -> ArticlesHookReturn {
    let binding = use_mut_ref(ListBinding::<Article>::new);
    let update = use_force_update();

    let issue = {
        let binding = binding.clone();
        Rc::new(move |ticket: RequestTicket<FetchParams>| {
            let binding = binding.clone();
            let params = ticket.key().clone();
            let request =
                async move { get_api_client().list_articles(&params).await };
            spawn_request(update.clone(), request, move |result| {
                binding.borrow_mut().complete(ticket, result)
            });
        })
    };

    let refetch = {
        let binding = binding.clone();
        let issue = issue.clone();
        Callback::from(move |()| {
            let ticket = binding.borrow_mut().refetch();
            if let Some(ticket) = ticket {
                issue(ticket);
            }
        })
    };

    {
        let binding = binding.clone();
        use_effect_with(params.clone(), move |params| {
            let ticket = binding.borrow_mut().set_params(params.clone());
            if let Some(ticket) = ticket {
                issue(ticket);
            }
        });
    }

    {
        let binding = binding.clone();
        use_effect_with((), move |_| {
            move || binding.borrow_mut().deactivate()
        });
    }

    let binding = binding.borrow();
    ArticlesHookReturn {
        articles: binding.items().to_vec(),
        total_count: binding.total_count(),
        has_next: binding.has_next(),
        has_previous: binding.has_previous(),
        is_loading: binding.loading(),
        error: binding.error().map(String::from),
        params: binding.params().cloned().unwrap_or(params),
        refetch,
    }
}
