use payloads::{requests::RagSearch, responses::RagSearchResponse};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::get_portal_client;

/// Free-text search over internal documents through the portal's MAI proxy.
///
/// Only the answer to the latest submitted query is shown.
#[function_component]
pub fn MaiSearch() -> Html {
    let query = use_state(String::new);
    let answer = use_state(|| None::<RagSearchResponse>);
    let is_searching = use_state(|| false);
    let latest = use_mut_ref(|| 0u64);

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let on_submit = {
        let query = query.clone();
        let answer = answer.clone();
        let is_searching = is_searching.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = query.trim().to_string();
            if text.is_empty() {
                return;
            }

            let generation = {
                let mut latest = latest.borrow_mut();
                *latest += 1;
                *latest
            };
            let latest = latest.clone();
            let answer = answer.clone();
            let is_searching = is_searching.clone();
            is_searching.set(true);

            yew::platform::spawn_local(async move {
                let request = RagSearch { query: text };
                let envelope = match get_portal_client().rag_search(&request).await
                {
                    Ok((status, envelope)) => {
                        tracing::debug!(%status, "MAI search answered");
                        envelope
                    }
                    Err(e) => RagSearchResponse::failure(
                        bindings::error::normalize(&e),
                    ),
                };
                if *latest.borrow() != generation {
                    tracing::debug!(generation, "discarding superseded search");
                    return;
                }
                answer.set(Some(envelope));
                is_searching.set(false);
            });
        })
    };

    let result = match (*answer).as_ref() {
        None => html! {},
        Some(RagSearchResponse {
            success: true,
            context,
            ..
        }) if !context.is_empty() => html! {
            <div class="p-4 rounded-md bg-neutral-50 dark:bg-neutral-800 \
                        whitespace-pre-line text-sm">
                {context}
            </div>
        },
        Some(RagSearchResponse {
            error: Some(error), ..
        }) => html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border \
                        border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            </div>
        },
        Some(_) => html! {
            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                {"Aucun document ne correspond à cette recherche."}
            </p>
        },
    };

    html! {
        <section class="space-y-4">
            <h2 class="text-xl font-semibold">{"Recherche MAI"}</h2>
            <form class="flex gap-3" onsubmit={on_submit}>
                <input
                    type="search"
                    class="flex-1 px-3 py-2 border border-neutral-300 \
                           dark:border-neutral-600 rounded-md text-sm \
                           bg-white dark:bg-neutral-800"
                    placeholder="Posez une question sur les documents internes"
                    value={(*query).clone()}
                    oninput={on_input}
                />
                <button
                    type="submit"
                    disabled={*is_searching}
                    class="bg-neutral-900 hover:bg-neutral-800 \
                           dark:bg-neutral-100 dark:text-neutral-900 \
                           text-white px-4 py-2 rounded-md text-sm font-medium"
                >
                    {if *is_searching { "Recherche..." } else { "Rechercher" }}
                </button>
            </form>
            {result}
        </section>
    }
}
