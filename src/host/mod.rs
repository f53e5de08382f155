//! Host Module - Capabilities the detector reads from its environment
//!
//! The detector never touches ambient globals. Everything it needs is
//! injected through these traits:
//!
//! - **HostWindow** - viewport size, touch points, user agent, change events
//! - **UserAgentSniffer** - coarse mobile/tablet signals from the user agent
//!
//! Two hosts ship with the crate:
//!
//! - [`SimulatedWindow`] - deterministic, driven by hand (tests, headless)
//! - [`TerminalWindow`] - a crossterm terminal, resize events from the tty
//!
//! # Example
//!
//! ```ignore
//! use spark_device::host::{HostWindow, SimulatedWindow};
//! use std::rc::Rc;
//!
//! let window = SimulatedWindow::new(1280, 800);
//! let cleanup = window.on_resize(Rc::new(|| println!("resized")));
//!
//! window.resize_to(800, 1280); // prints "resized"
//! cleanup();
//! ```

mod listeners;
mod simulated;
mod terminal;

pub use listeners::ListenerSet;
pub use simulated::SimulatedWindow;
pub use terminal::{TerminalWindow, DEFAULT_CELL_SIZE};

use std::rc::Rc;

use crate::types::ViewportSnapshot;

// =============================================================================
// Listener Types
// =============================================================================

/// Callback invoked when the host reports a change.
pub type HostListener = Rc<dyn Fn()>;

/// Removes a listener. Dropping it without calling leaves the listener in place.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Host Window
// =============================================================================

/// The window the detector observes.
pub trait HostWindow {
    /// Inner viewport width in pixels.
    fn inner_width(&self) -> u32;

    /// Inner viewport height in pixels.
    fn inner_height(&self) -> u32;

    /// Maximum simultaneous touch points (0 = no touch).
    fn max_touch_points(&self) -> u32;

    /// Raw user agent string.
    fn user_agent(&self) -> String;

    /// Subscribe to resize events. Returns the cleanup function.
    fn on_resize(&self, listener: HostListener) -> Cleanup;

    /// Subscribe to screen orientation changes.
    ///
    /// Returns `None` when the host has no orientation API.
    fn on_orientation_change(&self, listener: HostListener) -> Option<Cleanup>;

    /// Read the current viewport state.
    fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot::new(self.inner_width(), self.inner_height(), self.max_touch_points())
    }
}

// =============================================================================
// User Agent Sniffing
// =============================================================================

bitflags::bitflags! {
    /// Coarse device signals derived from the user agent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct UaFlags: u8 {
        const NONE = 0;
        const MOBILE = 1 << 0;
        const TABLET = 1 << 1;
    }
}

impl UaFlags {
    pub fn is_mobile(&self) -> bool {
        self.contains(UaFlags::MOBILE)
    }

    pub fn is_tablet(&self) -> bool {
        self.contains(UaFlags::TABLET)
    }
}

/// Opaque oracle reporting mobile/tablet signals for the current user agent.
pub trait UserAgentSniffer {
    fn sniff(&self) -> UaFlags;
}

/// Sniffer that always reports the same flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticSniffer {
    flags: UaFlags,
}

impl StaticSniffer {
    pub const fn new(flags: UaFlags) -> Self {
        Self { flags }
    }

    pub const fn mobile() -> Self {
        Self::new(UaFlags::MOBILE)
    }

    pub const fn tablet() -> Self {
        Self::new(UaFlags::TABLET)
    }

    /// Neither mobile nor tablet.
    pub const fn desktop() -> Self {
        Self::new(UaFlags::NONE)
    }
}

impl UserAgentSniffer for StaticSniffer {
    fn sniff(&self) -> UaFlags {
        self.flags
    }
}

impl<F> UserAgentSniffer for F
where
    F: Fn() -> UaFlags,
{
    fn sniff(&self) -> UaFlags {
        self()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ua_flags() {
        assert!(UaFlags::MOBILE.is_mobile());
        assert!(!UaFlags::MOBILE.is_tablet());
        assert!((UaFlags::MOBILE | UaFlags::TABLET).is_tablet());
        assert!(!UaFlags::default().is_mobile());
    }

    #[test]
    fn test_static_sniffer() {
        assert_eq!(StaticSniffer::mobile().sniff(), UaFlags::MOBILE);
        assert_eq!(StaticSniffer::tablet().sniff(), UaFlags::TABLET);
        assert_eq!(StaticSniffer::desktop().sniff(), UaFlags::NONE);
    }

    #[test]
    fn test_closure_sniffer() {
        let sniffer = || UaFlags::TABLET;
        assert!(sniffer.sniff().is_tablet());
    }

    #[test]
    fn test_snapshot_from_host() {
        let window = SimulatedWindow::new(640, 480);
        window.set_touch_points(5);
        assert_eq!(window.snapshot(), ViewportSnapshot::new(640, 480, 5));
    }
}
