use std::future::Future;
use std::rc::Rc;

use bindings::{Completion, FetchBinding, FetchState, HookState, RequestTicket};
use payloads::ClientError;
use yew::prelude::*;

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    fn from_state(state: &HookState<T>, refetch: Callback<()>) -> Self {
        Self {
            data: state.data.clone(),
            is_loading: state.loading,
            error: state.error.clone(),
            refetch,
        }
    }
}

impl<T> FetchHookReturn<T> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// Without data this shows a loading or error notice for `context`
    /// ("les statistiques", "les articles"...). Once data exists,
    /// `render_fn` receives it together with the refetch state, so stale
    /// data stays on screen while a refetch runs or after it failed.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            None if self.is_loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Chargement de {context}...")}
                    </p>
                </div>
            },
            None => match &self.error {
                Some(error) => html! {
                    <div class="p-4 rounded-md bg-red-50 \
                               dark:bg-red-900/20 border \
                               border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {format!("Impossible de charger {context} : {error}")}
                        </p>
                    </div>
                },
                None => html! {},
            },
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Spawn `request`, feed its result to `complete` and re-render when the
/// binding applied it. Also re-renders right away so `loading` shows.
pub(crate) fn spawn_request<R, Fut, C>(
    update: UseForceUpdateHandle,
    request: Fut,
    complete: C,
) where
    R: 'static,
    Fut: Future<Output = R> + 'static,
    C: FnOnce(R) -> Completion + 'static,
{
    update.force_update();
    yew::platform::spawn_local(async move {
        let result = request.await;
        if complete(result) == Completion::Applied {
            update.force_update();
        }
    });
}

/// Generic fetch hook composer.
///
/// Fetches on mount and whenever `key` changes by value, passing the key to
/// `fetch_fn`. Responses for an outdated key, or older than one already
/// shown, are dropped; so is everything that lands after unmount.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_article_stats() -> FetchHookReturn<responses::ArticleStats> {
///     use_fetch((), |()| async move {
///         get_api_client().article_stats().await
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<K, T, F, Fut>(key: K, fetch_fn: F) -> FetchHookReturn<T>
where
    K: PartialEq + Clone + 'static,
    T: Clone + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let binding = use_mut_ref(FetchBinding::<K, T>::new);
    let update = use_force_update();
    let fetch_fn = use_memo((), move |_| fetch_fn);

    let issue = {
        let binding = binding.clone();
        Rc::new(move |ticket: RequestTicket<K>| {
            let binding = binding.clone();
            let request = fetch_fn(ticket.key().clone());
            spawn_request(update.clone(), request, move |result| {
                let result = result.map_err(|e| bindings::error::normalize(&e));
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
        use_effect_with(key, move |key| {
            let ticket = binding.borrow_mut().observe(key.clone());
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

    let state = binding.borrow();
    FetchHookReturn::from_state(state.state(), refetch)
}
