use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use yewdux::{Context, Dispatch, Store};

/// Store slice holding the authentication flag.
#[derive(Debug, Default, Clone, PartialEq, Eq, Store)]
pub struct AuthState {
    pub authenticated: bool,
}

/// The one authentication truth shared by every hook instance.
///
/// The auth layer owns an `AuthSignal` and writes to it; hooks are handed an
/// [`AuthReader`] and can only read and subscribe. Both sides share the
/// [`AuthState`] kept in a yewdux [`Context`], so a test builds its own
/// context and the ui provides one through the component tree.
#[derive(Clone, PartialEq)]
pub struct AuthSignal {
    cx: Context,
}

impl AuthSignal {
    pub fn new(cx: Context) -> Self {
        Self { cx }
    }

    fn dispatch(&self) -> Dispatch<AuthState> {
        Dispatch::new(&self.cx)
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn get(&self) -> bool {
        self.dispatch().get().authenticated
    }

    pub fn set(&self, authenticated: bool) {
        if self.get() == authenticated {
            return;
        }
        tracing::debug!(authenticated, "auth signal changed");
        self.dispatch().set(AuthState { authenticated });
    }

    pub fn reader(&self) -> AuthReader {
        AuthReader::new(&self.cx)
    }
}

impl Default for AuthSignal {
    fn default() -> Self {
        Self::new(Context::new())
    }
}

impl fmt::Debug for AuthSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSignal")
            .field("authenticated", &self.get())
            .finish()
    }
}

/// Read-only view of the [`AuthState`] in a context.
#[derive(Clone, PartialEq)]
pub struct AuthReader {
    cx: Context,
}

impl AuthReader {
    pub fn new(cx: &Context) -> Self {
        Self { cx: cx.clone() }
    }

    pub fn get(&self) -> bool {
        Dispatch::<AuthState>::new(&self.cx).get().authenticated
    }

    /// Call `listener` with the current value right away, then with the new
    /// value on every change, until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        listener: impl Fn(bool) + 'static,
    ) -> Subscription {
        let last = Rc::new(Cell::new(None));
        let deliver = Rc::new(move |authenticated: bool| {
            if last.replace(Some(authenticated)) != Some(authenticated) {
                listener(authenticated);
            }
        });
        let dispatch = Dispatch::<AuthState>::new(&self.cx).subscribe({
            let deliver = deliver.clone();
            move |state: Rc<AuthState>| deliver(state.authenticated)
        });
        // no-op when the store already delivered the initial state
        deliver(self.get());
        Subscription {
            _dispatch: dispatch,
        }
    }
}

impl fmt::Debug for AuthReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthReader")
            .field("authenticated", &self.get())
            .finish()
    }
}

/// Unsubscribes on drop.
pub struct Subscription {
    _dispatch: Dispatch<AuthState>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
