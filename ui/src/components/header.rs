use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::{use_authentication, use_screen_size};

#[function_component]
pub fn Header() -> Html {
    let authenticated = use_authentication();
    let screen = use_screen_size();

    let title = if screen.is_small_mobile() {
        "Intranet"
    } else {
        "Portail intranet"
    };

    html! {
        <header class="border-b border-neutral-200 dark:border-neutral-700">
            <nav class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 h-16 \
                        flex items-center justify-between">
                <Link<Route> to={Route::Home} classes="text-lg font-semibold">
                    {title}
                </Link<Route>>
                <div class="flex items-center gap-4 text-sm">
                    <Link<Route> to={Route::Home}>{"Actualités"}</Link<Route>>
                    if authenticated {
                        <Link<Route> to={Route::Directory}>{"Annuaire"}</Link<Route>>
                    } else {
                        <span class="text-neutral-500 dark:text-neutral-400">
                            {"Non connecté"}
                        </span>
                    }
                </div>
            </nav>
        </header>
    }
}
