use bindings::{BrowserInfo, BrowserProbe, CapabilitySource};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};
use yew::prelude::*;

struct WebCapabilities {
    window: Option<Window>,
}

impl WebCapabilities {
    fn current() -> Self {
        Self {
            window: web_sys::window(),
        }
    }
}

impl CapabilitySource for WebCapabilities {
    fn user_agent(&self) -> Option<String> {
        self.window.as_ref()?.navigator().user_agent().ok()
    }

    fn supports_css(&self, property: &str, value: &str) -> bool {
        self.window.is_some()
            && web_sys::css::supports_with_value(property, value)
                .unwrap_or(false)
    }

    fn max_touch_points(&self) -> u32 {
        self.window
            .as_ref()
            .map(|w| w.navigator().max_touch_points())
            .and_then(|points| u32::try_from(points).ok())
            .unwrap_or(0)
    }

    // Browsers that cannot encode webp fall back to png in toDataURL
    fn supports_webp(&self) -> bool {
        let Some(document) = self.window.as_ref().and_then(Window::document)
        else {
            return false;
        };
        document
            .create_element("canvas")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                canvas.set_width(1);
                canvas.set_height(1);
                canvas.to_data_url_with_type("image/webp").ok()
            })
            .is_some_and(|url| url.starts_with("data:image/webp"))
    }
}

/// Browser identity and capabilities, detected once after mount.
///
/// Until then, and outside a browser, every flag is false.
#[hook]
pub fn use_browser_detection() -> BrowserInfo {
    let probe = use_mut_ref(BrowserProbe::new);
    let update = use_force_update();

    {
        let probe = probe.clone();
        use_effect_with((), move |_| {
            if !probe.borrow().is_detected() {
                probe.borrow_mut().activate(&WebCapabilities::current());
                update.force_update();
            }
        });
    }

    let info = probe.borrow().info().clone();
    info
}
