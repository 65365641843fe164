use payloads::responses::ArticleStats;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{FetchHookReturn, use_fetch};

/// Counters for the dashboard, fetched once on mount.
#[hook]
pub fn use_article_stats() -> FetchHookReturn<ArticleStats> {
    use_fetch((), |()| async move { get_api_client().article_stats().await })
}
