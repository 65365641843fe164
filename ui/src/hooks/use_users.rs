use std::rc::Rc;

use bindings::{AuthReader, GatedBinding, RequestTicket};
use payloads::responses::User;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::use_fetch::spawn_request;

pub struct UsersHookReturn {
    pub users: Vec<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

/// The user directory, fetched whenever the session becomes authenticated.
///
/// Reads the auth store's context; without one the hook stays idle.
#[hook]
pub fn use_users() -> UsersHookReturn {
    let auth =
        use_context::<yewdux::Context>().map(|cx| AuthReader::new(&cx));
    let binding = use_mut_ref(GatedBinding::<User>::new);
    let update = use_force_update();

    let issue = {
        let binding = binding.clone();
        let update = update.clone();
        Rc::new(move |ticket: RequestTicket<()>| {
            let binding = binding.clone();
            let request = async { get_api_client().list_users().await };
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
        use_effect_with(auth, move |auth| {
            let observe = move |authenticated: bool| {
                let ticket = binding.borrow_mut().observe_auth(authenticated);
                match ticket {
                    Some(ticket) => issue(ticket),
                    None => update.force_update(),
                }
            };
            let subscription =
                auth.as_ref().map(|reader| reader.subscribe(observe));
            move || drop(subscription)
        });
    }

    {
        let binding = binding.clone();
        use_effect_with((), move |_| {
            move || binding.borrow_mut().deactivate()
        });
    }

    let binding = binding.borrow();
    UsersHookReturn {
        users: binding.items().to_vec(),
        is_authenticated: binding.is_authenticated(),
        is_loading: binding.loading(),
        error: binding.error().map(String::from),
        refetch,
    }
}
