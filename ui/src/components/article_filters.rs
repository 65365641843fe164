use payloads::FetchParams;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

const TYPES: [(&str, &str); 4] = [
    ("", "Tous les types"),
    ("actualite", "Actualités"),
    ("note", "Notes de service"),
    ("procedure", "Procédures"),
];

const PERIODS: [(&str, &str); 4] = [
    ("", "Toutes les dates"),
    ("week", "Cette semaine"),
    ("month", "Ce mois-ci"),
    ("year", "Cette année"),
];

#[derive(Properties, PartialEq)]
pub struct Props {
    pub params: FetchParams,
    /// Receives the edited params, always back on page 1
    pub on_change: Callback<FetchParams>,
}

/// Search box and type/period selects. Every keystroke emits new params.
#[function_component]
pub fn ArticleFilters(props: &Props) -> Html {
    let edit = |apply: fn(FetchParams, String) -> FetchParams| {
        let params = props.params.clone();
        let on_change = props.on_change.clone();
        move |value: String| {
            on_change.emit(apply(params.clone(), value).with_page(1));
        }
    };

    let on_search = {
        let emit = edit(FetchParams::with_search);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            emit(input.value());
        })
    };
    let on_type = {
        let emit = edit(FetchParams::with_type);
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            emit(select.value());
        })
    };
    let on_period = {
        let emit = edit(FetchParams::with_time_filter);
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            emit(select.value());
        })
    };

    let options = |choices: &[(&'static str, &'static str)],
                   selected: Option<&str>| {
        choices
            .iter()
            .map(|(value, label)| {
                let is_selected = selected.unwrap_or_default() == *value;
                html! {
                    <option value={*value} selected={is_selected}>{*label}</option>
                }
            })
            .collect::<Html>()
    };

    let field_class = "px-3 py-2 border border-neutral-300 \
                       dark:border-neutral-600 rounded-md text-sm \
                       bg-white dark:bg-neutral-800";

    html! {
        <div class="flex flex-col md:flex-row gap-3">
            <input
                type="search"
                class={classes!(field_class, "flex-1")}
                placeholder="Rechercher un article"
                value={props.params.search.clone().unwrap_or_default()}
                oninput={on_search}
            />
            <select class={field_class} onchange={on_type}>
                {options(&TYPES, props.params.article_type.as_deref())}
            </select>
            <select class={field_class} onchange={on_period}>
                {options(&PERIODS, props.params.time_filter.as_deref())}
            </select>
        </div>
    }
}
