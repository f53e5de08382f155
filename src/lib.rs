//! # spark-device
//!
//! Reactive viewport device-type detection.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A detector reads a host window, classifies the viewport into a device
//! category, and publishes the result through signals:
//!
//! ```text
//! HostWindow events → Throttle → classify (rule table) → signals → your deriveds/effects
//! ```
//!
//! Everything ambient is injected: the window ([`host::HostWindow`]), the
//! user-agent oracle ([`host::UserAgentSniffer`]) and the timer
//! ([`scheduler::Scheduler`]). With [`host::SimulatedWindow`] and
//! [`scheduler::ManualScheduler`] the whole pipeline is deterministic.
//!
//! ## Modules
//!
//! - [`types`] - Device categories, device types, orientation, snapshots
//! - [`breakpoints`] - Width thresholds
//! - [`config`] - Detection configuration (TOML)
//! - [`classify`] - Ordered rule table and width ladder
//! - [`host`] - Host window and sniffer capabilities, bundled hosts
//! - [`scheduler`] - Deferred tasks (virtual and wall clock)
//! - [`throttle`] - Leading/trailing throttle
//! - [`detection`] - The detector itself

pub mod breakpoints;
pub mod classify;
pub mod config;
pub mod detection;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod throttle;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use breakpoints::BreakpointTable;

pub use classify::{classify, classify_device_type, Classification, DeviceFacts, Rule, RuleSet};

pub use config::DetectionConfig;

pub use detection::{
    use_device_type_detection, DetectionContext, DetectionSignals, DeviceDetection,
    DeviceDetectionResult,
};

pub use error::{ConfigError, UnknownDeviceType};

pub use host::{
    HostWindow, SimulatedWindow, StaticSniffer, TerminalWindow, UaFlags, UserAgentSniffer,
};

pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, TimerId};

pub use throttle::{Throttle, ThrottleEdges};

/// Everything needed to wire up a detector.
pub mod prelude {
    pub use crate::config::DetectionConfig;
    pub use crate::detection::{use_device_type_detection, DetectionContext, DeviceDetection, DeviceDetectionResult};
    pub use crate::host::{HostWindow, SimulatedWindow, StaticSniffer, TerminalWindow, UaFlags, UserAgentSniffer};
    pub use crate::scheduler::{ManualScheduler, Scheduler, SystemScheduler};
    pub use crate::types::{DeviceCategory, DeviceType, Orientation};
}
