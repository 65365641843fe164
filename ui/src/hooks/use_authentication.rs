use bindings::AuthState;
use yew::prelude::*;
use yewdux::prelude::*;

/// Current value of the authentication flag, re-rendering on change.
///
/// Read-only: the host page's auth layer writes through
/// [`crate::set_authenticated`].
#[hook]
pub fn use_authentication() -> bool {
    let authenticated = use_selector(|state: &AuthState| state.authenticated);
    *authenticated
}
