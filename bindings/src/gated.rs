use payloads::ClientError;

use crate::error;
use crate::fetch::{Completion, FetchBinding, HookState, RequestTicket};

/// A full collection that is only fetched while authenticated.
///
/// Being logged out is not an error: the binding just stays idle. The first
/// false→true transition (including activation while already logged in)
/// issues exactly one fetch; true→false keeps the last data and discards
/// responses still in flight.
#[derive(Debug)]
pub struct GatedBinding<T> {
    inner: FetchBinding<(), Vec<T>>,
    authenticated: bool,
}

impl<T> Default for GatedBinding<T> {
    fn default() -> Self {
        Self {
            inner: FetchBinding::default(),
            authenticated: false,
        }
    }
}

impl<T> GatedBinding<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current value of the auth signal.
    pub fn observe_auth(
        &mut self,
        authenticated: bool,
    ) -> Option<RequestTicket<()>> {
        match (self.authenticated, authenticated) {
            (false, true) => {
                self.authenticated = true;
                if !self.inner.is_active() {
                    return None;
                }
                Some(self.inner.start(()))
            }
            (true, false) => {
                self.authenticated = false;
                self.inner.abandon();
                None
            }
            _ => None,
        }
    }

    /// Safe to call unconditionally: does nothing while logged out.
    pub fn refetch(&mut self) -> Option<RequestTicket<()>> {
        if !self.authenticated {
            tracing::debug!("refetch skipped, not authenticated");
            return None;
        }
        self.inner.refetch()
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket<()>,
        result: Result<Vec<T>, ClientError>,
    ) -> Completion {
        let result = result.map_err(|e| error::normalize(&e));
        self.inner.complete(ticket, result)
    }

    pub fn deactivate(&mut self) {
        self.inner.deactivate();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn state(&self) -> &HookState<Vec<T>> {
        self.inner.state()
    }

    pub fn items(&self) -> &[T] {
        self.state()
            .data
            .as_ref()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state().error.as_deref()
    }
}
