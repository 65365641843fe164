//! Framework-agnostic reactive bindings for the portal's data hooks.
//!
//! - `fetch`: generic request tagging and the `HookState` every hook
//!   surfaces.
//! - `list`: paginated, filterable collections keyed by `FetchParams`.
//! - `gated`: collections fetched only while authenticated.
//! - `auth`: the shared authentication flag, kept in a yewdux store.
//! - `environment`: viewport classification and its listener lifecycle.
//! - `browser`: one-shot browser and capability detection.
//! - `error`: turning client failures into user-facing messages.

pub mod auth;
pub mod browser;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod gated;
pub mod list;

pub use auth::{AuthReader, AuthSignal, AuthState, Subscription};
pub use browser::{BrowserInfo, BrowserProbe, CapabilitySource};
pub use environment::{
    DeviceClass, EnvironmentEvent, EnvironmentSnapshot, EventSource,
    Orientation, ScreenProbe, SizeClass, Viewport,
};
pub use fetch::{Completion, FetchBinding, FetchState, HookState, RequestTicket};
pub use gated::GatedBinding;
pub use list::ListBinding;
