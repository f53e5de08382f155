//! Simulated host window.
//!
//! A window whose state is set by hand. Events are only delivered when the
//! caller dispatches them, which makes detector behavior fully deterministic
//! when paired with a [`ManualScheduler`](crate::scheduler::ManualScheduler).

use std::cell::{Cell, RefCell};

use super::{Cleanup, HostListener, HostWindow, ListenerSet};

pub struct SimulatedWindow {
    width: Cell<u32>,
    height: Cell<u32>,
    touch_points: Cell<u32>,
    user_agent: RefCell<String>,
    supports_orientation: bool,
    resize_listeners: ListenerSet,
    orientation_listeners: ListenerSet,
}

impl SimulatedWindow {
    /// Non-touch window with an empty user agent and an orientation API.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            touch_points: Cell::new(0),
            user_agent: RefCell::new(String::new()),
            supports_orientation: true,
            resize_listeners: ListenerSet::new(),
            orientation_listeners: ListenerSet::new(),
        }
    }

    /// Window without a screen orientation API.
    pub fn without_orientation_api(width: u32, height: u32) -> Self {
        Self {
            supports_orientation: false,
            ..Self::new(width, height)
        }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.width.set(width);
        self.height.set(height);
    }

    pub fn set_touch_points(&self, touch_points: u32) {
        self.touch_points.set(touch_points);
    }

    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        *self.user_agent.borrow_mut() = user_agent.into();
    }

    /// Deliver a resize event to every resize listener.
    pub fn dispatch_resize(&self) {
        self.resize_listeners.dispatch();
    }

    /// Deliver an orientation change event.
    pub fn dispatch_orientation_change(&self) {
        self.orientation_listeners.dispatch();
    }

    /// Set the size and dispatch a resize event.
    pub fn resize_to(&self, width: u32, height: u32) {
        self.set_size(width, height);
        self.dispatch_resize();
    }

    /// Swap width and height and dispatch an orientation change.
    pub fn rotate(&self) {
        let (width, height) = (self.width.get(), self.height.get());
        self.set_size(height, width);
        self.dispatch_orientation_change();
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    pub fn orientation_listener_count(&self) -> usize {
        self.orientation_listeners.len()
    }
}

impl HostWindow for SimulatedWindow {
    fn inner_width(&self) -> u32 {
        self.width.get()
    }

    fn inner_height(&self) -> u32 {
        self.height.get()
    }

    fn max_touch_points(&self) -> u32 {
        self.touch_points.get()
    }

    fn user_agent(&self) -> String {
        self.user_agent.borrow().clone()
    }

    fn on_resize(&self, listener: HostListener) -> Cleanup {
        self.resize_listeners.add(listener)
    }

    fn on_orientation_change(&self, listener: HostListener) -> Option<Cleanup> {
        if self.supports_orientation {
            Some(self.orientation_listeners.add(listener))
        } else {
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
