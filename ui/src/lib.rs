use bindings::AuthSignal;
use payloads::{APIClient, PortalClient};
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod hooks;
pub mod logs;
pub mod pages;

use components::Header;
use pages::{DirectoryPage, HomePage, NotFoundPage};

thread_local! {
    static AUTH: AuthSignal = AuthSignal::new(yewdux::Context::new());
}

/// Entry point for the host page's auth layer, the only writer of the
/// authentication store.
#[wasm_bindgen(js_name = setAuthenticated)]
pub fn set_authenticated(authenticated: bool) {
    tracing::debug!(authenticated, "auth signal updated");
    AUTH.with(|auth| auth.set(authenticated));
}

/// The yewdux context holding the auth store, provided to the whole tree.
pub fn auth_context() -> yewdux::Context {
    AUTH.with(|auth| auth.context().clone())
}

fn same_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

// Backend address - configurable at build time, same origin otherwise
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(same_origin);
    APIClient::new(address)
}

/// Client for the portal server that hosts the MAI search proxy.
pub fn get_portal_client() -> PortalClient {
    let address = option_env!("PORTAL_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(same_origin);
    PortalClient::new(address)
}

#[function_component]
pub fn App() -> Html {
    let cx = use_memo((), |_| auth_context());

    html! {
        <ContextProvider<yewdux::Context> context={(*cx).clone()}>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <Header />
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<yewdux::Context>>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/annuaire")]
    Directory,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let page = match routes {
        Route::Home => html! { <HomePage /> },
        Route::Directory => html! { <DirectoryPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {page}
        </main>
    }
}
