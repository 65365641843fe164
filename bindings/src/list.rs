use payloads::{ClientError, FetchParams, ListResult};

use crate::error;
use crate::fetch::{Completion, FetchBinding, HookState, RequestTicket};

/// Paginated, filterable collection keyed by [`FetchParams`].
///
/// A fetch is issued on the first params value and on every change by value;
/// no debouncing.
#[derive(Debug)]
pub struct ListBinding<T> {
    inner: FetchBinding<FetchParams, ListResult<T>>,
}

impl<T> Default for ListBinding<T> {
    fn default() -> Self {
        Self {
            inner: FetchBinding::default(),
        }
    }
}

impl<T> ListBinding<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the caller's current params. Returns the request to issue, if
    /// any.
    pub fn set_params(
        &mut self,
        params: FetchParams,
    ) -> Option<RequestTicket<FetchParams>> {
        self.inner.observe(params)
    }

    /// Re-issue the fetch for the current params unconditionally.
    pub fn refetch(&mut self) -> Option<RequestTicket<FetchParams>> {
        self.inner.refetch()
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket<FetchParams>,
        result: Result<ListResult<T>, ClientError>,
    ) -> Completion {
        let result = result.map_err(|e| error::normalize(&e));
        self.inner.complete(ticket, result)
    }

    pub fn deactivate(&mut self) {
        self.inner.deactivate();
    }

    pub fn params(&self) -> Option<&FetchParams> {
        self.inner.key()
    }

    pub fn state(&self) -> &HookState<ListResult<T>> {
        self.inner.state()
    }

    /// Items of the last applied page, or nothing before the first success.
    pub fn items(&self) -> &[T] {
        self.state()
            .data
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    pub fn total_count(&self) -> u64 {
        self.state().data.as_ref().map_or(0, |page| page.total_count)
    }

    pub fn has_next(&self) -> bool {
        self.state().data.as_ref().is_some_and(|page| page.has_next)
    }

    pub fn has_previous(&self) -> bool {
        self.state().data.as_ref().is_some_and(|page| page.has_previous)
    }

    pub fn loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state().error.as_deref()
    }
}
