use payloads::{FetchParams, responses::Article};
use yew::prelude::*;

use crate::components::{ArticleFilters, MaiSearch, PaginationControls};
use crate::hooks::{
    use_article_stats, use_articles, use_browser_detection, use_screen_size,
};

#[function_component]
pub fn HomePage() -> Html {
    let params = use_state(FetchParams::default);
    let articles = use_articles((*params).clone());
    let stats = use_article_stats();
    let screen = use_screen_size();

    let on_filters = {
        let params = params.clone();
        Callback::from(move |next: FetchParams| params.set(next))
    };
    let on_next = {
        let params = params.clone();
        let next = articles.next_page();
        Callback::from(move |()| {
            if let Some(next) = next.clone() {
                params.set(next);
            }
        })
    };
    let on_previous = {
        let params = params.clone();
        let previous = articles.previous_page();
        Callback::from(move |()| {
            if let Some(previous) = previous.clone() {
                params.set(previous);
            }
        })
    };
    let on_retry = {
        let refetch = articles.refetch.clone();
        Callback::from(move |_: MouseEvent| refetch.emit(()))
    };

    let grid = if screen.is_mobile() {
        "grid grid-cols-1 gap-4"
    } else if screen.is_tablet() {
        "grid grid-cols-2 gap-4"
    } else {
        "grid grid-cols-3 gap-6"
    };

    html! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Actualités"}
                </h1>
                {stats.render("les statistiques", |stats, _, _| {
                    match stats.counter("total_articles") {
                        Some(total) => html! {
                            <p class="text-lg text-neutral-600 dark:text-neutral-400 mt-2">
                                {format!("{total} articles publiés")}
                            </p>
                        },
                        None => html! {},
                    }
                })}
            </div>

            <MaiSearch />

            <ArticleFilters params={(*params).clone()} on_change={on_filters} />

            if let Some(error) = &articles.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 flex justify-between items-center">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    <button onclick={on_retry} class="text-sm underline">{"Réessayer"}</button>
                </div>
            }

            if articles.is_loading && articles.articles.is_empty() {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"Chargement des articles..."}</p>
                </div>
            } else if articles.articles.is_empty() && articles.error.is_none() {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"Aucun article ne correspond à ces critères."}</p>
                </div>
            } else {
                <div class={classes!(grid, articles.is_loading.then_some("opacity-60"))}>
                    {for articles.articles.iter().map(|article| html! {
                        <ArticleCard key={article.id.to_string()} article={article.clone()} />
                    })}
                </div>
            }

            <PaginationControls
                page={articles.params.page}
                page_size={articles.params.page_size}
                current_count={articles.articles.len()}
                total_count={articles.total_count}
                has_next={articles.has_next}
                has_previous={articles.has_previous}
                is_loading={articles.is_loading}
                {on_next}
                {on_previous}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ArticleCardProps {
    article: Article,
}

#[function_component]
fn ArticleCard(props: &ArticleCardProps) -> Html {
    let browser = use_browser_detection();
    let article = &props.article;

    // Frosted badges only where the browser can blur behind them
    let badge = if browser.supports_backdrop_filter {
        "absolute top-3 left-3 px-2 py-1 rounded text-xs bg-white/60 backdrop-blur"
    } else {
        "absolute top-3 left-3 px-2 py-1 rounded text-xs bg-white"
    };

    html! {
        <article class="relative bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700">
            if let Some(kind) = &article.article_type {
                <span class={badge}>{kind}</span>
            }
            if let Some(url) = &article.image_url {
                <img src={url.clone()} alt="" class="w-full h-40 object-cover rounded mb-4" loading="lazy" />
            }
            <h3 class="text-xl font-semibold text-neutral-900 dark:text-neutral-100">
                {&article.title}
            </h3>
            if let Some(summary) = &article.summary {
                <p class="mt-2 text-sm text-neutral-600 dark:text-neutral-400">{summary}</p>
            }
            <p class="mt-4 text-xs text-neutral-500">
                {article.author.clone().unwrap_or_default()}
                if let Some(published) = article.published_at {
                    {format!(" · {}", published.strftime("%d/%m/%Y"))}
                }
            </p>
        </article>
    }
}
