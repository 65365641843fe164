pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, PortalClient};

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct ArticleId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct UserId(pub i64);

/// Filter and pagination intent for a list request.
///
/// Compared by value: bindings issue a new fetch whenever any field differs
/// from the previously observed params.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Category filter, sent as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub article_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_filter: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            search: None,
            article_type: None,
            time_filter: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FetchParams {
    /// Set the free-text query. Blank text clears the filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search.into());
        self
    }

    pub fn with_type(mut self, article_type: impl Into<String>) -> Self {
        self.article_type = non_blank(article_type.into());
        self
    }

    pub fn with_time_filter(mut self, time_filter: impl Into<String>) -> Self {
        self.time_filter = non_blank(time_filter.into());
        self
    }

    /// Pages start at 1; zero is clamped.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// One page of a server-ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl<T> From<responses::Page<T>> for ListResult<T> {
    fn from(page: responses::Page<T>) -> Self {
        // the backend count can lag behind the page contents
        let total_count = page.count.max(page.results.len() as u64);
        Self {
            items: page.results,
            total_count,
            has_next: page.next.is_some(),
            has_previous: page.previous.is_some(),
        }
    }
}
