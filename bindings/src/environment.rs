//! Viewport classification and the resize/orientation listener lifecycle.

use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Widths below this are mobile.
pub const TABLET_MIN_WIDTH: u32 = 768;
/// Widths from this up are desktop.
pub const DESKTOP_MIN_WIDTH: u32 = 1024;
pub const LARGE_MOBILE_MIN_WIDTH: u32 = 480;
pub const LARGE_TABLET_MIN_WIDTH: u32 = 900;

/// Reported until a browsing environment is available.
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

/// Finer partition of the same width space as [`DeviceClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    SmallMobile,
    LargeMobile,
    SmallTablet,
    LargeTablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Everything derived from the viewport, recomputed wholesale on each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvironmentSnapshot {
    pub width: u32,
    pub height: u32,
    pub device: DeviceClass,
    pub size: SizeClass,
    pub orientation: Orientation,
}

impl EnvironmentSnapshot {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let size = match width {
            w if w < LARGE_MOBILE_MIN_WIDTH => SizeClass::SmallMobile,
            w if w < TABLET_MIN_WIDTH => SizeClass::LargeMobile,
            w if w < LARGE_TABLET_MIN_WIDTH => SizeClass::SmallTablet,
            w if w < DESKTOP_MIN_WIDTH => SizeClass::LargeTablet,
            _ => SizeClass::Desktop,
        };
        let device = match size {
            SizeClass::SmallMobile | SizeClass::LargeMobile => {
                DeviceClass::Mobile
            }
            SizeClass::SmallTablet | SizeClass::LargeTablet => {
                DeviceClass::Tablet
            }
            SizeClass::Desktop => DeviceClass::Desktop,
        };
        // ties are portrait
        let orientation = if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        Self {
            width,
            height,
            device,
            size,
            orientation,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.device == DeviceClass::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.device == DeviceClass::Tablet
    }

    pub fn is_desktop(&self) -> bool {
        self.device == DeviceClass::Desktop
    }

    pub fn is_small_mobile(&self) -> bool {
        self.size == SizeClass::SmallMobile
    }

    pub fn is_large_mobile(&self) -> bool {
        self.size == SizeClass::LargeMobile
    }

    pub fn is_small_tablet(&self) -> bool {
        self.size == SizeClass::SmallTablet
    }

    pub fn is_large_tablet(&self) -> bool {
        self.size == SizeClass::LargeTablet
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }

    pub fn is_portrait(&self) -> bool {
        self.orientation == Orientation::Portrait
    }
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self::from_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Source of the current viewport size. `None` when there is no browsing
/// environment (server rendering, tests, workers).
pub trait Viewport {
    fn dimensions(&self) -> Option<(u32, u32)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentEvent {
    Resize,
    OrientationChange,
}

impl EnvironmentEvent {
    pub const ALL: [EnvironmentEvent; 2] =
        [EnvironmentEvent::Resize, EnvironmentEvent::OrientationChange];

    /// DOM event type.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::OrientationChange => "orientationchange",
        }
    }
}

/// Registers and removes environment change listeners.
pub trait EventSource: Viewport {
    type Handle;

    /// Returns `None` when the listener could not be registered.
    fn listen(
        &self,
        event: EnvironmentEvent,
        callback: Rc<dyn Fn()>,
    ) -> Option<Self::Handle>;

    fn unlisten(&self, handle: Self::Handle);
}

struct Published {
    current: Cell<EnvironmentSnapshot>,
    on_change: Box<dyn Fn(EnvironmentSnapshot)>,
}

impl Published {
    fn refresh(&self, viewport: &impl Viewport) {
        let Some((width, height)) = viewport.dimensions() else {
            return;
        };
        let next = EnvironmentSnapshot::from_dimensions(width, height);
        if self.current.replace(next) != next {
            (self.on_change)(next);
        }
    }
}

/// Keeps an [`EnvironmentSnapshot`] current while active.
///
/// `activate` takes a synchronous snapshot and registers one listener per
/// [`EnvironmentEvent`]; `deactivate` (or drop) removes exactly those.
pub struct ScreenProbe<S: EventSource + 'static> {
    source: Rc<S>,
    published: Rc<Published>,
    handles: Vec<S::Handle>,
    active: bool,
}

impl<S: EventSource + 'static> ScreenProbe<S> {
    pub fn new(
        source: S,
        on_change: impl Fn(EnvironmentSnapshot) + 'static,
    ) -> Self {
        Self {
            source: Rc::new(source),
            published: Rc::new(Published {
                current: Cell::new(EnvironmentSnapshot::default()),
                on_change: Box::new(on_change),
            }),
            handles: Vec::new(),
            active: false,
        }
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        self.published.current.get()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Idempotent.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.published.refresh(self.source.as_ref());

        for event in EnvironmentEvent::ALL {
            let published = Rc::downgrade(&self.published);
            let source: Weak<S> = Rc::downgrade(&self.source);
            let callback: Rc<dyn Fn()> = Rc::new(move || {
                if let (Some(published), Some(source)) =
                    (published.upgrade(), source.upgrade())
                {
                    published.refresh(source.as_ref());
                }
            });
            match self.source.listen(event, callback) {
                Some(handle) => self.handles.push(handle),
                None => tracing::debug!(
                    event = event.event_type(),
                    "no environment to listen on"
                ),
            }
        }
    }

    /// Recompute from the source now, as an event would.
    pub fn refresh(&self) {
        if self.active {
            self.published.refresh(self.source.as_ref());
        }
    }

    pub fn deactivate(&mut self) {
        for handle in self.handles.drain(..) {
            self.source.unlisten(handle);
        }
        self.active = false;
    }
}

impl<S: EventSource + 'static> Drop for ScreenProbe<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeWindow {
        size: Cell<Option<(u32, u32)>>,
        next_id: Cell<usize>,
        listeners: RefCell<Vec<(usize, EnvironmentEvent, Rc<dyn Fn()>)>>,
    }

    impl FakeWindow {
        fn sized(width: u32, height: u32) -> Rc<Self> {
            let window = Self::default();
            window.size.set(Some((width, height)));
            Rc::new(window)
        }

        fn fire(&self, event: EnvironmentEvent) {
            let callbacks: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(_, e, _)| *e == event)
                .map(|(_, _, cb)| cb.clone())
                .collect();
            for callback in callbacks {
                callback();
            }
        }

        fn live(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl Viewport for Rc<FakeWindow> {
        fn dimensions(&self) -> Option<(u32, u32)> {
            self.size.get()
        }
    }

    impl EventSource for Rc<FakeWindow> {
        type Handle = usize;

        fn listen(
            &self,
            event: EnvironmentEvent,
            callback: Rc<dyn Fn()>,
        ) -> Option<usize> {
            self.size.get()?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.listeners.borrow_mut().push((id, event, callback));
            Some(id)
        }

        fn unlisten(&self, handle: usize) {
            self.listeners.borrow_mut().retain(|(id, _, _)| *id != handle);
        }
    }

    fn recording(
        window: &Rc<FakeWindow>,
    ) -> (ScreenProbe<Rc<FakeWindow>>, Rc<RefCell<Vec<EnvironmentSnapshot>>>)
    {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let probe = ScreenProbe::new(window.clone(), {
            let seen = seen.clone();
            move |snapshot| seen.borrow_mut().push(snapshot)
        });
        (probe, seen)
    }

    #[test]
    fn device_boundaries_are_exact() {
        let tablet = EnvironmentSnapshot::from_dimensions(1023, 700);
        assert!(tablet.is_tablet() && !tablet.is_desktop());
        assert!(tablet.is_large_tablet());

        let desktop = EnvironmentSnapshot::from_dimensions(1024, 700);
        assert!(desktop.is_desktop() && !desktop.is_tablet());

        let mobile = EnvironmentSnapshot::from_dimensions(767, 800);
        assert!(mobile.is_mobile());
        assert!(mobile.is_large_mobile());
        assert!(mobile.is_portrait());

        assert!(EnvironmentSnapshot::from_dimensions(768, 1).is_small_tablet());
        assert!(EnvironmentSnapshot::from_dimensions(899, 1).is_small_tablet());
        assert!(EnvironmentSnapshot::from_dimensions(900, 1).is_large_tablet());
        assert!(EnvironmentSnapshot::from_dimensions(479, 1).is_small_mobile());
        assert!(EnvironmentSnapshot::from_dimensions(480, 1).is_large_mobile());
    }

    #[test]
    fn exactly_one_device_class_for_any_width() {
        for width in (0..2000).step_by(7).chain([767, 768, 1023, 1024]) {
            let s = EnvironmentSnapshot::from_dimensions(width, 600);
            let classes =
                [s.is_mobile(), s.is_tablet(), s.is_desktop()];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{width}");
        }
    }

    #[test]
    fn square_viewport_is_portrait() {
        let square = EnvironmentSnapshot::from_dimensions(800, 800);
        assert_eq!(square.orientation, Orientation::Portrait);
        let wide = EnvironmentSnapshot::from_dimensions(801, 800);
        assert_eq!(wide.orientation, Orientation::Landscape);
    }

    #[test]
    fn headless_reports_default() {
        let window = Rc::new(FakeWindow::default());
        let (mut probe, seen) = recording(&window);
        probe.activate();

        assert_eq!(probe.snapshot(), EnvironmentSnapshot::default());
        assert!(probe.snapshot().is_desktop());
        assert!(seen.borrow().is_empty());
        assert_eq!(window.live(), 0);
    }

    #[test]
    fn activation_takes_initial_snapshot() {
        let window = FakeWindow::sized(375, 812);
        let (mut probe, seen) = recording(&window);
        assert_eq!(probe.snapshot(), EnvironmentSnapshot::default());

        probe.activate();
        assert!(probe.snapshot().is_small_mobile());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(window.live(), 2);
    }

    #[test]
    fn events_recompute_whole_snapshot() {
        let window = FakeWindow::sized(375, 812);
        let (mut probe, seen) = recording(&window);
        probe.activate();

        window.size.set(Some((812, 375)));
        window.fire(EnvironmentEvent::OrientationChange);
        let rotated = probe.snapshot();
        assert!(rotated.is_tablet());
        assert!(rotated.is_landscape());
        assert_eq!(rotated.width, 812);

        window.size.set(Some((1440, 900)));
        window.fire(EnvironmentEvent::Resize);
        assert!(probe.snapshot().is_desktop());
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn unchanged_viewport_is_not_republished() {
        let window = FakeWindow::sized(1280, 720);
        let (mut probe, seen) = recording(&window);
        probe.activate();
        window.fire(EnvironmentEvent::Resize);
        window.fire(EnvironmentEvent::Resize);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn activate_is_idempotent() {
        let window = FakeWindow::sized(1280, 720);
        let (mut probe, _) = recording(&window);
        probe.activate();
        probe.activate();
        assert_eq!(window.live(), 2);
    }

    #[test]
    fn teardown_removes_both_listeners() {
        let window = FakeWindow::sized(1280, 720);
        let (mut probe, seen) = recording(&window);
        probe.activate();
        probe.deactivate();
        assert_eq!(window.live(), 0);

        window.size.set(Some((320, 640)));
        window.fire(EnvironmentEvent::Resize);
        assert_eq!(seen.borrow().len(), 1);

        probe.activate();
        assert_eq!(window.live(), 2);
        drop(probe);
        assert_eq!(window.live(), 0);
    }
}
