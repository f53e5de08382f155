//! Device Type Detection - the viewport classifier
//!
//! Subscribes to a host window, classifies its viewport and publishes the
//! result through signals. Downstream deriveds and effects re-run only when
//! the published values actually change.
//!
//! # Lifecycle
//!
//! ```text
//! use_device_type_detection(ctx)
//!   ├─ classify once, synchronously
//!   ├─ resize            → throttle (150ms, leading + trailing) → classify
//!   └─ orientation change → classify (unthrottled)
//!
//! teardown() / drop
//!   ├─ mark inactive (nothing classifies after this point)
//!   ├─ remove both listeners
//!   └─ cancel the pending throttled call
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_device::prelude::*;
//! use std::rc::Rc;
//!
//! let window = Rc::new(SimulatedWindow::new(390, 844));
//! window.set_touch_points(5);
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let ctx = DetectionContext::new(Rc::new(StaticSniffer::mobile()), scheduler.clone())
//!     .with_window(window.clone());
//!
//! let detection = use_device_type_detection(ctx);
//! assert!(detection.result().is_mobile_vertical);
//!
//! window.resize_to(844, 390);
//! scheduler.advance_ms(150);
//! assert!(detection.result().is_mobile_horizontal);
//! ```

mod result;

pub use result::DeviceDetectionResult;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use spark_signals::{peek, signal, untrack, Signal};

use crate::classify::{DeviceFacts, RuleSet};
use crate::config::DetectionConfig;
use crate::host::{Cleanup, HostWindow, UserAgentSniffer};
use crate::scheduler::Scheduler;
use crate::throttle::{Throttle, ThrottleEdges};
use crate::types::{DeviceType, OrientationFlags, ViewportSnapshot};

// =============================================================================
// Context
// =============================================================================

/// Collaborators and configuration for one detector.
pub struct DetectionContext {
    pub window: Option<Rc<dyn HostWindow>>,
    pub sniffer: Rc<dyn UserAgentSniffer>,
    pub scheduler: Rc<dyn Scheduler>,
    pub config: DetectionConfig,
    pub rules: RuleSet,
}

impl DetectionContext {
    /// Context without a host window. Attach one with [`with_window`](Self::with_window).
    pub fn new(sniffer: Rc<dyn UserAgentSniffer>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            window: None,
            sniffer,
            scheduler,
            config: DetectionConfig::default(),
            rules: RuleSet::standard(),
        }
    }

    pub fn with_window(mut self, window: Rc<dyn HostWindow>) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}

// =============================================================================
// Signals
// =============================================================================

/// Reactive state published by a detector.
#[derive(Clone)]
pub struct DetectionSignals {
    pub device_type: Signal<DeviceType>,
    pub orientation: Signal<OrientationFlags>,
    pub touch_device: Signal<bool>,
    /// Bumped once per recomputation that changed anything above.
    pub generation: Signal<u64>,
}

impl DetectionSignals {
    fn new(orientation: OrientationFlags, touch_device: bool) -> Self {
        Self {
            device_type: signal(DeviceType::EMPTY),
            orientation: signal(orientation),
            touch_device: signal(touch_device),
            generation: signal(0),
        }
    }

    /// Read every signal into a result.
    pub fn result(&self) -> DeviceDetectionResult {
        DeviceDetectionResult::from_parts(
            self.device_type.get(),
            self.orientation.get(),
            self.touch_device.get(),
        )
    }
}

// =============================================================================
// Detector State
// =============================================================================

struct DetectorState {
    window: Rc<dyn HostWindow>,
    sniffer: Rc<dyn UserAgentSniffer>,
    config: DetectionConfig,
    rules: RuleSet,
    signals: DetectionSignals,
    active: Cell<bool>,
}

impl DetectorState {
    /// Re-read the host and publish whatever changed.
    fn check_device_type(&self) {
        if !self.active.get() {
            return;
        }

        // May run inside a caller's effect (via refresh); nothing read here
        // may become a dependency of that effect.
        untrack(|| self.publish(self.window.snapshot()));
    }

    fn publish(&self, snapshot: ViewportSnapshot) {
        if snapshot.width == 0 || snapshot.height == 0 {
            tracing::warn!(
                width = snapshot.width,
                height = snapshot.height,
                "host reported an empty viewport"
            );
        }

        let mut changed = self.signals.orientation.set(snapshot.orientation());
        changed |= self.signals.touch_device.set(snapshot.is_touch());

        let user_agent = self.window.user_agent();
        let facts = DeviceFacts::new(snapshot, self.sniffer.sniff(), &user_agent);
        let classification = self.rules.classify(&facts, &self.config);
        let device_type = classification.device_type(&snapshot);

        let previous = peek(|| self.signals.device_type.get());
        if self.signals.device_type.set(device_type) {
            tracing::debug!(
                from = %previous,
                to = %device_type,
                rule = classification.rule,
                width = snapshot.width,
                height = snapshot.height,
                "device type changed"
            );
            changed = true;
        } else {
            tracing::trace!(device_type = %device_type, "device type unchanged");
        }

        if changed {
            let next = peek(|| self.signals.generation.get()) + 1;
            self.signals.generation.set(next);
        }
    }
}

// =============================================================================
// Device Detection Handle
// =============================================================================

/// An active detector.
///
/// Tears itself down on drop.
pub struct DeviceDetection {
    signals: DetectionSignals,
    state: Option<Rc<DetectorState>>,
    throttle: Option<Rc<Throttle>>,
    resize_cleanup: Option<Cleanup>,
    orientation_cleanup: Option<Cleanup>,
}

/// Activate a detector.
///
/// Classifies immediately, then keeps the published state current until
/// [`DeviceDetection::teardown`] or drop. Without a host window the result
/// stays at [`DeviceDetectionResult::inert`] and no listeners are registered.
pub fn use_device_type_detection(ctx: DetectionContext) -> DeviceDetection {
    let DetectionContext {
        window,
        sniffer,
        scheduler,
        config,
        rules,
    } = ctx;

    let Some(window) = window else {
        tracing::debug!("no host window, device detection inert");
        return DeviceDetection {
            signals: DetectionSignals::new(OrientationFlags::PORTRAIT_DEFAULT, false),
            state: None,
            throttle: None,
            resize_cleanup: None,
            orientation_cleanup: None,
        };
    };

    let initial = window.snapshot();
    let signals = DetectionSignals::new(initial.orientation(), initial.is_touch());

    let state = Rc::new(DetectorState {
        window: window.clone(),
        sniffer,
        config,
        rules,
        signals: signals.clone(),
        active: Cell::new(true),
    });

    state.check_device_type();

    let edges = if config.resize_leading_edge {
        ThrottleEdges::BOTH
    } else {
        ThrottleEdges::TRAILING
    };

    let weak_state: Weak<DetectorState> = Rc::downgrade(&state);
    let throttle = Rc::new(Throttle::new(scheduler, config.resize_throttle(), edges, move || {
        if let Some(state) = weak_state.upgrade() {
            state.check_device_type();
        }
    }));

    let weak_throttle = Rc::downgrade(&throttle);
    let resize_cleanup = window.on_resize(Rc::new(move || {
        if let Some(throttle) = weak_throttle.upgrade() {
            throttle.call();
        }
    }));

    let weak_state = Rc::downgrade(&state);
    let orientation_cleanup = window.on_orientation_change(Rc::new(move || {
        if let Some(state) = weak_state.upgrade() {
            state.check_device_type();
        }
    }));

    tracing::debug!(
        device_type = %peek(|| signals.device_type.get()),
        throttle_ms = config.resize_throttle_ms,
        orientation_events = orientation_cleanup.is_some(),
        "device detection active"
    );

    DeviceDetection {
        signals,
        state: Some(state),
        throttle: Some(throttle),
        resize_cleanup: Some(resize_cleanup),
        orientation_cleanup,
    }
}

impl DeviceDetection {
    /// Current result, all fields computed together.
    pub fn result(&self) -> DeviceDetectionResult {
        self.signals.result()
    }

    pub fn device_type(&self) -> DeviceType {
        self.signals.device_type.get()
    }

    pub fn orientation(&self) -> OrientationFlags {
        self.signals.orientation.get()
    }

    pub fn touch_device(&self) -> bool {
        self.signals.touch_device.get()
    }

    /// Number of recomputations that changed published state.
    pub fn generation(&self) -> u64 {
        self.signals.generation.get()
    }

    /// Signals for reactive tracking.
    pub fn signals(&self) -> &DetectionSignals {
        &self.signals
    }

    pub fn device_type_signal(&self) -> Signal<DeviceType> {
        self.signals.device_type.clone()
    }

    pub fn orientation_signal(&self) -> Signal<OrientationFlags> {
        self.signals.orientation.clone()
    }

    pub fn touch_device_signal(&self) -> Signal<bool> {
        self.signals.touch_device.clone()
    }

    pub fn generation_signal(&self) -> Signal<u64> {
        self.signals.generation.clone()
    }

    /// Classify now, bypassing the throttle.
    pub fn refresh(&self) {
        if let Some(state) = &self.state {
            state.check_device_type();
        }
    }

    /// True until teardown. Always false without a host window.
    pub fn is_active(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.active.get())
    }

    /// True while a throttled resize is waiting to run.
    pub fn has_pending_resize(&self) -> bool {
        self.throttle.as_ref().is_some_and(|throttle| throttle.is_pending())
    }

    /// Stop listening. Safe to call more than once.
    pub fn teardown(&mut self) {
        let was_active = self.is_active();

        if let Some(state) = &self.state {
            state.active.set(false);
        }

        if let Some(cleanup) = self.resize_cleanup.take() {
            cleanup();
        }
        if let Some(cleanup) = self.orientation_cleanup.take() {
            cleanup();
        }
        if let Some(throttle) = self.throttle.take() {
            throttle.cancel();
        }

        if was_active {
            tracing::debug!("device detection torn down");
        }
    }
}

impl Drop for DeviceDetection {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoints::{DESKTOP_MAX_WIDTH, TABLET_S_MAX_WIDTH};
    use crate::host::{SimulatedWindow, StaticSniffer};
    use crate::scheduler::ManualScheduler;
    use crate::types::Orientation;
    use spark_signals::effect;
    use std::cell::RefCell;

    fn setup(
        sniffer: StaticSniffer,
        touch_points: u32,
        width: u32,
        height: u32,
    ) -> (Rc<SimulatedWindow>, Rc<ManualScheduler>, DeviceDetection) {
        let window = Rc::new(SimulatedWindow::new(width, height));
        window.set_touch_points(touch_points);
        let scheduler = Rc::new(ManualScheduler::new());

        let ctx = DetectionContext::new(Rc::new(sniffer), scheduler.clone()).with_window(window.clone());
        let detection = use_device_type_detection(ctx);
        (window, scheduler, detection)
    }

    #[test]
    fn test_mobile_s_horizontal() {
        let (_window, _scheduler, detection) = setup(StaticSniffer::mobile(), 1, 300, 200);
        let result = detection.result();

        assert_eq!(result.device_type_label(), "MOBILE_S_HORIZONTAL");
        assert!(result.is_mobile_horizontal);
        assert!(result.is_mobile);
        assert!(result.touch_device);
    }

    #[test]
    fn test_mobile_l_vertical() {
        let (_window, _scheduler, detection) = setup(StaticSniffer::mobile(), 1, 400, 800);
        let result = detection.result();

        assert_eq!(result.device_type_label(), "MOBILE_L_VERTICAL");
        assert!(result.is_mobile_vertical);
    }

    #[test]
    fn test_tablet_m_horizontal() {
        let (_window, _scheduler, detection) =
            setup(StaticSniffer::tablet(), 1, TABLET_S_MAX_WIDTH + 100, 600);
        let result = detection.result();

        assert_eq!(result.device_type_label(), "TABLET_M_HORIZONTAL");
        assert!(result.is_tablet_horizontal);
        assert!(result.is_tablet);
    }

    #[test]
    fn test_desktop_horizontal_in_reduced_mode() {
        let (_window, _scheduler, detection) =
            setup(StaticSniffer::desktop(), 0, DESKTOP_MAX_WIDTH + 100, 800);
        let result = detection.result();

        assert_eq!(result.device_type_label(), "DESKTOP_HORIZONTAL");
        assert!(result.is_desktop);
        assert!(!result.touch_device);
    }

    #[test]
    fn test_initial_classification_is_synchronous() {
        let (_window, scheduler, detection) = setup(StaticSniffer::desktop(), 0, 200, 300);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(detection.device_type().label(), "DESKTOP_VERTICAL");
        assert_eq!(detection.generation(), 1);
    }

    #[test]
    fn test_unchanged_snapshot_does_not_notify() {
        let (window, scheduler, detection) = setup(StaticSniffer::mobile(), 1, 300, 200);
        let generation = detection.generation();

        detection.refresh();
        detection.refresh();
        window.dispatch_resize();
        scheduler.advance_ms(500);

        assert_eq!(detection.generation(), generation);
        assert_eq!(detection.device_type().label(), "MOBILE_S_HORIZONTAL");
    }

    #[test]
    fn test_same_category_new_size_does_not_notify() {
        let (window, scheduler, detection) = setup(StaticSniffer::desktop(), 0, 1600, 900);
        let generation = detection.generation();

        // Still landscape desktop
        window.resize_to(1700, 950);
        scheduler.advance_ms(200);
        assert_eq!(detection.generation(), generation);
    }

    #[test]
    fn test_resize_is_throttled() {
        let (window, scheduler, detection) = setup(StaticSniffer::mobile(), 1, 300, 200);

        // Leading edge runs immediately
        window.resize_to(300, 600);
        assert_eq!(detection.device_type().label(), "MOBILE_S_VERTICAL");

        // Burst inside the window is coalesced
        window.resize_to(350, 600);
        window.resize_to(360, 600);
        window.resize_to(500, 400);
        assert_eq!(detection.device_type().label(), "MOBILE_S_VERTICAL");
        assert!(detection.has_pending_resize());

        scheduler.advance_ms(150);
        assert_eq!(detection.device_type().label(), "MOBILE_L_HORIZONTAL");
        assert!(!detection.has_pending_resize());
    }

    #[test]
    fn test_orientation_change_is_immediate() {
        let (window, _scheduler, detection) = setup(StaticSniffer::tablet(), 5, 800, 1200);
        assert_eq!(detection.device_type().label(), "TABLET_S_VERTICAL");

        window.rotate();
        assert_eq!(detection.device_type().label(), "TABLET_L_HORIZONTAL");
        assert_eq!(detection.result().orientation, Orientation::Landscape);
    }

    #[test]
    fn test_teardown_removes_listeners_and_cancels_pending() {
        let (window, scheduler, mut detection) = setup(StaticSniffer::mobile(), 1, 300, 200);
        assert_eq!(window.resize_listener_count(), 1);
        assert_eq!(window.orientation_listener_count(), 1);

        window.resize_to(300, 600);
        window.resize_to(500, 400);
        assert!(detection.has_pending_resize());

        detection.teardown();
        assert!(!detection.is_active());
        assert_eq!(window.resize_listener_count(), 0);
        assert_eq!(window.orientation_listener_count(), 0);
        assert_eq!(scheduler.pending(), 0);

        let generation = detection.generation();
        scheduler.advance_ms(1_000);
        window.rotate();
        detection.refresh();
        assert_eq!(detection.generation(), generation);

        // Idempotent
        detection.teardown();
    }

    #[test]
    fn test_drop_tears_down() {
        let (window, scheduler, detection) = setup(StaticSniffer::mobile(), 1, 300, 200);
        drop(detection);
        assert_eq!(window.resize_listener_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_no_window_is_inert() {
        let scheduler = Rc::new(ManualScheduler::new());
        let detection =
            use_device_type_detection(DetectionContext::new(Rc::new(StaticSniffer::mobile()), scheduler.clone()));

        assert_eq!(detection.result(), DeviceDetectionResult::inert());
        assert!(!detection.is_active());
        assert!(!detection.has_pending_resize());
        detection.refresh();
        assert_eq!(detection.generation(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_host_without_orientation_api() {
        let window = Rc::new(SimulatedWindow::without_orientation_api(1024, 768));
        let scheduler = Rc::new(ManualScheduler::new());
        let ctx = DetectionContext::new(Rc::new(StaticSniffer::desktop()), scheduler).with_window(window.clone());

        let mut detection = use_device_type_detection(ctx);
        assert!(detection.is_active());
        assert_eq!(window.resize_listener_count(), 1);

        detection.teardown();
        assert_eq!(window.resize_listener_count(), 0);
    }

    #[test]
    fn test_full_ladder_config() {
        let window = Rc::new(SimulatedWindow::new(3840, 2160));
        let scheduler = Rc::new(ManualScheduler::new());
        let ctx = DetectionContext::new(Rc::new(StaticSniffer::desktop()), scheduler.clone())
            .with_window(window.clone())
            .with_config(DetectionConfig::full_ladder());

        let detection = use_device_type_detection(ctx);
        assert_eq!(detection.device_type().label(), "TV_4K_HORIZONTAL");

        window.resize_to(1366, 768);
        assert_eq!(detection.device_type().label(), "LAPTOP_HORIZONTAL");
    }

    #[test]
    fn test_refresh_inside_effect_does_not_subscribe_it() {
        let (window, scheduler, detection) = setup(StaticSniffer::mobile(), 1, 300, 200);
        let detection = Rc::new(detection);

        let unrelated = signal(0u32);
        let runs = Rc::new(Cell::new(0));

        let detection_clone = detection.clone();
        let unrelated_clone = unrelated.clone();
        let runs_clone = runs.clone();
        let _dispose = effect(move || {
            let _ = unrelated_clone.get();
            detection_clone.refresh();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        // Every detector signal changes; the effect must not notice
        window.set_touch_points(0);
        window.resize_to(500, 900);
        scheduler.advance_ms(200);
        window.rotate();
        assert_eq!(detection.device_type().label(), "DESKTOP_HORIZONTAL");
        assert_eq!(runs.get(), 1);

        // Its own dependency still works
        unrelated.set(1);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_detector_created_inside_effect_leaves_it_untracked() {
        let window = Rc::new(SimulatedWindow::new(300, 200));
        window.set_touch_points(1);
        let scheduler = Rc::new(ManualScheduler::new());

        let slot: Rc<RefCell<Option<DeviceDetection>>> = Rc::new(RefCell::new(None));
        let runs = Rc::new(Cell::new(0));

        let slot_clone = slot.clone();
        let runs_clone = runs.clone();
        let window_clone = window.clone();
        let scheduler_clone = scheduler.clone();
        let _dispose = effect(move || {
            runs_clone.set(runs_clone.get() + 1);
            if slot_clone.borrow().is_none() {
                let ctx = DetectionContext::new(Rc::new(StaticSniffer::mobile()), scheduler_clone.clone())
                    .with_window(window_clone.clone());
                *slot_clone.borrow_mut() = Some(use_device_type_detection(ctx));
            }
        });
        assert_eq!(runs.get(), 1);

        window.resize_to(400, 800);
        scheduler.advance_ms(200);

        let label = slot.borrow().as_ref().map(|d| d.device_type().label());
        assert_eq!(label.as_deref(), Some("MOBILE_L_VERTICAL"));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_effect_on_device_type_runs_only_on_change() {
        let (window, scheduler, detection) = setup(StaticSniffer::desktop(), 0, 1600, 900);
        let device_type = detection.device_type_signal();
        let runs = Rc::new(Cell::new(0));

        let runs_clone = runs.clone();
        let _dispose = effect(move || {
            let _ = device_type.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        // Same category and orientation
        window.resize_to(1700, 950);
        scheduler.advance_ms(200);
        assert_eq!(runs.get(), 1);

        window.resize_to(900, 1600);
        scheduler.advance_ms(200);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_touch_flag_tracks_host() {
        let (window, _scheduler, detection) = setup(StaticSniffer::tablet(), 0, 1024, 768);
        assert!(!detection.touch_device());
        assert!(detection.result().is_desktop);

        window.set_touch_points(10);
        detection.refresh();
        assert!(detection.touch_device());
        assert_eq!(detection.device_type().label(), "TABLET_M_HORIZONTAL");
    }
}
