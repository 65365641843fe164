use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Current page (1-indexed)
    pub page: u32,
    pub page_size: u32,
    /// Items on the current page
    pub current_count: usize,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub on_next: Callback<()>,
    pub on_previous: Callback<()>,
    /// Disables both buttons while a page is loading
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Props {
        page,
        page_size,
        current_count,
        total_count,
        has_next,
        has_previous,
        is_loading,
        ..
    } = *props;

    if total_count == 0 {
        return html! {};
    }

    let on_previous = {
        let on_previous = props.on_previous.clone();
        Callback::from(move |_: MouseEvent| on_previous.emit(()))
    };
    let on_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };

    let range_start = u64::from(page.saturating_sub(1)) * u64::from(page_size);
    let range_end = range_start + current_count as u64;

    let prev_disabled = !has_previous || is_loading;
    let next_disabled = !has_next || is_loading;

    let button_class = |disabled: bool| {
        if disabled {
            "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
             rounded-md text-sm font-medium text-neutral-400 \
             dark:text-neutral-500 bg-neutral-100 dark:bg-neutral-800 \
             cursor-not-allowed"
        } else {
            "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
             rounded-md text-sm font-medium text-neutral-700 \
             dark:text-neutral-300 bg-white dark:bg-neutral-700 \
             hover:bg-neutral-50 dark:hover:bg-neutral-600 \
             transition-colors duration-200"
        }
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 \
                    border-t border-neutral-200 dark:border-neutral-700">
            <button
                onclick={on_previous}
                disabled={prev_disabled}
                class={button_class(prev_disabled)}
            >
                {"Précédent"}
            </button>

            <span class="text-sm text-neutral-600 dark:text-neutral-400">
                {format!("{}-{} sur {}", range_start + 1, range_end, total_count)}
            </span>

            <button
                onclick={on_next}
                disabled={next_disabled}
                class={button_class(next_disabled)}
            >
                {"Suivant"}
            </button>
        </div>
    }
}
