use std::rc::Rc;

use bindings::{
    EnvironmentEvent, EnvironmentSnapshot, EventSource, ScreenProbe, Viewport,
};
use wasm_bindgen::prelude::*;
use web_sys::Window;
use yew::prelude::*;

/// The browser window as seen by [`ScreenProbe`].
struct WindowEvents {
    window: Option<Window>,
}

impl WindowEvents {
    fn current() -> Self {
        Self {
            window: web_sys::window(),
        }
    }
}

impl Viewport for WindowEvents {
    fn dimensions(&self) -> Option<(u32, u32)> {
        let window = self.window.as_ref()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width as u32, height as u32))
    }
}

impl EventSource for WindowEvents {
    // Rust keeps the closure alive; JS only holds a pointer to it
    type Handle = (EnvironmentEvent, Closure<dyn Fn()>);

    fn listen(
        &self,
        event: EnvironmentEvent,
        callback: Rc<dyn Fn()>,
    ) -> Option<Self::Handle> {
        let window = self.window.as_ref()?;
        let closure = Closure::<dyn Fn()>::new(move || callback());
        window
            .add_event_listener_with_callback(
                event.event_type(),
                closure.as_ref().unchecked_ref(),
            )
            .ok()?;
        Some((event, closure))
    }

    fn unlisten(&self, (event, closure): Self::Handle) {
        if let Some(window) = &self.window {
            let _ = window.remove_event_listener_with_callback(
                event.event_type(),
                closure.as_ref().unchecked_ref(),
            );
        }
        drop(closure);
    }
}

/// Viewport classification kept current across resizes and rotations.
///
/// Renders with the desktop default until mounted in a browser.
#[hook]
pub fn use_screen_size() -> EnvironmentSnapshot {
    let snapshot = use_state(EnvironmentSnapshot::default);

    {
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let mut probe =
                ScreenProbe::new(WindowEvents::current(), move |next| {
                    snapshot.set(next)
                });
            probe.activate();
            // Dropping the probe removes both listeners
            move || drop(probe)
        });
    }

    *snapshot
}
