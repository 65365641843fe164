use yew::prelude::*;

use crate::hooks::{use_screen_size, use_users};

/// Staff directory. Visible to everyone, populated once logged in.
#[function_component]
pub fn DirectoryPage() -> Html {
    let users = use_users();
    let screen = use_screen_size();

    let on_refresh = {
        let refetch = users.refetch.clone();
        Callback::from(move |_: MouseEvent| refetch.emit(()))
    };

    let body = if !users.is_authenticated && users.users.is_empty() {
        html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Connectez-vous pour consulter l'annuaire."}
                </p>
            </div>
        }
    } else if users.is_loading && users.users.is_empty() {
        html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">{"Chargement de l'annuaire..."}</p>
            </div>
        }
    } else {
        html! {
            <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                {for users.users.iter().filter(|u| u.is_active).map(|user| html! {
                    <li key={user.id.to_string()} class="py-3 flex justify-between gap-4">
                        <div>
                            <p class="font-medium">{user.display_name()}</p>
                            if !screen.is_small_mobile() {
                                if let Some(email) = &user.email {
                                    <p class="text-sm text-neutral-500">{email}</p>
                                }
                            }
                        </div>
                        <span class="text-sm text-neutral-600 dark:text-neutral-400">
                            {user.department.clone().unwrap_or_default()}
                        </span>
                    </li>
                })}
            </ul>
        }
    };

    html! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Annuaire"}
                </h1>
                if users.is_authenticated {
                    <button
                        onclick={on_refresh}
                        disabled={users.is_loading}
                        class="px-4 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md text-sm"
                    >
                        {"Actualiser"}
                    </button>
                }
            </div>
            if let Some(error) = &users.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }
            {body}
        </div>
    }
}
