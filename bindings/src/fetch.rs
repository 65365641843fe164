/// Distinguishes "not fetched yet" from "fetched but empty".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}

/// What a hook surfaces to its component.
///
/// `data` survives failed refetches, so a component can render stale data
/// next to `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookState<T> {
    pub data: FetchState<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: FetchState::NotFetched,
            loading: false,
            error: None,
        }
    }
}

impl<T> HookState<T> {
    /// No data yet, a request in flight, and nothing failed.
    pub fn is_initial_loading(&self) -> bool {
        self.loading && !self.data.is_fetched() && self.error.is_none()
    }
}

/// Tag attached to an outgoing request.
///
/// Carries the key (params) the request was issued for and its generation,
/// so the binding can tell a stale response from an authoritative one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket<K> {
    generation: u64,
    key: K,
}

impl<K> RequestTicket<K> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Outcome of handing a response back to a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response became the current state.
    Applied,
    /// The key changed since the request was issued, or a newer response
    /// for the same key already landed. State is untouched.
    Superseded,
    /// The binding was torn down. State is untouched.
    Inactive,
}

/// Keyed fetch lifecycle with tag-and-discard ordering.
///
/// Generations increase with every issued request. A response is applied
/// only if its key is still current and no newer response has been applied,
/// and `loading` clears once the most recently issued request settles.
#[derive(Debug)]
pub struct FetchBinding<K, T> {
    key: Option<K>,
    issued: u64,
    applied: u64,
    active: bool,
    state: HookState<T>,
}

impl<K, T> Default for FetchBinding<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            issued: 0,
            applied: 0,
            active: true,
            state: HookState::default(),
        }
    }
}

impl<K: Clone + PartialEq, T> FetchBinding<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HookState<T> {
        &self.state
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record the latest key. Returns a ticket only when the key differs
    /// from the current one by value.
    pub fn observe(&mut self, key: K) -> Option<RequestTicket<K>> {
        if !self.active || self.key.as_ref() == Some(&key) {
            return None;
        }
        Some(self.start(key))
    }

    /// Set the key and issue a request for it unconditionally.
    pub fn start(&mut self, key: K) -> RequestTicket<K> {
        self.key = Some(key.clone());
        self.begin(key)
    }

    /// Issue a request for the current key, even if nothing changed.
    pub fn refetch(&mut self) -> Option<RequestTicket<K>> {
        if !self.active {
            return None;
        }
        let key = self.key.clone()?;
        Some(self.begin(key))
    }

    fn begin(&mut self, key: K) -> RequestTicket<K> {
        self.issued += 1;
        self.state.loading = true;
        self.state.error = None;
        RequestTicket {
            generation: self.issued,
            key,
        }
    }

    /// Apply a response for `ticket`. Errors are already user-facing
    /// messages; on error the previous data is kept.
    pub fn complete(
        &mut self,
        ticket: RequestTicket<K>,
        result: Result<T, String>,
    ) -> Completion {
        if !self.active {
            return Completion::Inactive;
        }
        if self.key.as_ref() != Some(&ticket.key)
            || ticket.generation <= self.applied
        {
            tracing::debug!(
                generation = ticket.generation,
                "discarding superseded response"
            );
            return Completion::Superseded;
        }

        self.applied = ticket.generation;
        match result {
            Ok(data) => {
                self.state.data = FetchState::Fetched(data);
                self.state.error = None;
            }
            Err(message) => {
                self.state.error = Some(message);
            }
        }
        if ticket.generation == self.issued {
            self.state.loading = false;
        }
        Completion::Applied
    }

    /// Treat every outstanding request as superseded. Data stays in place.
    pub fn abandon(&mut self) {
        self.applied = self.issued;
        self.state.loading = false;
    }

    /// Tear down: later completions become no-ops.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.state.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_issues_once_per_distinct_key() {
        let mut binding = FetchBinding::<&str, u32>::new();
        assert!(binding.observe("a").is_some());
        assert!(binding.observe("a").is_none());
        assert!(binding.observe("b").is_some());
        assert!(binding.observe("a").is_some());
    }

    #[test]
    fn begin_clears_error_and_sets_loading() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let ticket = binding.observe(1).unwrap();
        binding.complete(ticket, Err("boom".into()));
        assert_eq!(binding.state().error.as_deref(), Some("boom"));

        binding.refetch().unwrap();
        assert!(binding.state().loading);
        assert_eq!(binding.state().error, None);
    }

    #[test]
    fn error_keeps_stale_data() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let ticket = binding.observe(1).unwrap();
        binding.complete(ticket, Ok(10));
        let ticket = binding.refetch().unwrap();
        binding.complete(ticket, Err("down".into()));

        let state = binding.state();
        assert_eq!(state.data, FetchState::Fetched(10));
        assert_eq!(state.error.as_deref(), Some("down"));
        assert!(!state.loading);
    }

    #[test]
    fn response_for_old_key_is_discarded() {
        let mut binding = FetchBinding::<&str, u32>::new();
        let old = binding.observe("sécurité").unwrap();
        let new = binding.observe("sécu").unwrap();

        assert_eq!(binding.complete(new, Ok(2)), Completion::Applied);
        assert_eq!(binding.complete(old, Ok(1)), Completion::Superseded);
        assert_eq!(binding.state().data, FetchState::Fetched(2));
        assert!(!binding.state().loading);
    }

    #[test]
    fn out_of_order_refetches_keep_newest() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let first = binding.observe(1).unwrap();
        let second = binding.refetch().unwrap();

        assert_eq!(binding.complete(second, Ok(2)), Completion::Applied);
        assert_eq!(binding.complete(first, Ok(1)), Completion::Superseded);
        assert_eq!(binding.state().data, FetchState::Fetched(2));
    }

    #[test]
    fn loading_until_latest_request_settles() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let first = binding.observe(1).unwrap();
        let second = binding.refetch().unwrap();

        binding.complete(first, Ok(1));
        assert!(binding.state().loading);
        binding.complete(second, Ok(2));
        assert!(!binding.state().loading);
    }

    #[test]
    fn completion_after_teardown_is_ignored() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let ticket = binding.observe(1).unwrap();
        binding.deactivate();

        assert_eq!(binding.complete(ticket, Ok(5)), Completion::Inactive);
        assert_eq!(binding.state().data, FetchState::NotFetched);
        assert!(binding.observe(2).is_none());
        assert!(binding.refetch().is_none());
    }

    #[test]
    fn abandon_discards_in_flight_requests() {
        let mut binding = FetchBinding::<(), u32>::new();
        let ticket = binding.start(());
        binding.abandon();

        assert!(!binding.state().loading);
        assert_eq!(binding.complete(ticket, Ok(1)), Completion::Superseded);
    }

    #[test]
    fn initial_loading_only_before_first_data() {
        let mut binding = FetchBinding::<u8, u32>::new();
        let ticket = binding.observe(1).unwrap();
        assert!(binding.state().is_initial_loading());
        binding.complete(ticket, Ok(1));
        binding.refetch();
        assert!(!binding.state().is_initial_loading());
    }
}
