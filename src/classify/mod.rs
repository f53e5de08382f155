//! Classification - viewport facts in, device category out
//!
//! Pure functions only. The detector gathers [`DeviceFacts`] from its host
//! and sniffer, then asks a [`RuleSet`] for the first matching rule:
//!
//! | # | Rule                    | Applies when                                   | Bucket            |
//! |---|-------------------------|------------------------------------------------|-------------------|
//! | 1 | `mobile-ua`             | mobile UA, touch, not iPad-like                | MOBILE_S/M/L      |
//! | 2 | `tablet-ua`             | (tablet UA or iPad-like), touch                | TABLET_S/M/L      |
//! | 3 | `reduced-functionality` | reduced mode enabled                           | DESKTOP           |
//! | 4 | `width-ladder`          | always                                         | full width ladder |

mod ladder;
mod rules;

pub use ladder::{bucket_mobile, bucket_tablet, width_ladder};
pub use rules::{Rule, RuleSet};

use crate::config::DetectionConfig;
use crate::host::UaFlags;
use crate::types::{DeviceCategory, DeviceType, ViewportSnapshot};

// =============================================================================
// Facts
// =============================================================================

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFacts {
    pub snapshot: ViewportSnapshot,
    pub ua: UaFlags,
    /// iPad heuristic matched (see [`is_ipad_user_agent`]).
    pub ipad_like: bool,
}

impl DeviceFacts {
    pub fn new(snapshot: ViewportSnapshot, ua: UaFlags, user_agent: &str) -> Self {
        Self {
            snapshot,
            ua,
            ipad_like: is_ipad_user_agent(user_agent, snapshot.touch_points),
        }
    }

    pub const fn width(&self) -> u32 {
        self.snapshot.width
    }

    pub const fn is_touch(&self) -> bool {
        self.snapshot.is_touch()
    }
}

/// iPads that request desktop sites report a Macintosh user agent, so a
/// touch-capable "Macintosh" counts as well.
pub fn is_ipad_user_agent(user_agent: &str, touch_points: u32) -> bool {
    user_agent.to_ascii_lowercase().contains("ipad")
        || (user_agent.contains("Macintosh") && touch_points >= 1)
}

// =============================================================================
// Classification
// =============================================================================

/// Result of running a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: DeviceCategory,
    /// Name of the rule that matched.
    pub rule: &'static str,
}

impl Classification {
    /// Combine with the snapshot's orientation into a full device type.
    pub fn device_type(&self, snapshot: &ViewportSnapshot) -> DeviceType {
        DeviceType::oriented(self.category, snapshot.orientation())
    }
}

/// Classify with the default rule set.
pub fn classify(facts: &DeviceFacts, config: &DetectionConfig) -> Classification {
    RuleSet::standard().classify(facts, config)
}

/// Classify and attach the orientation suffix.
pub fn classify_device_type(facts: &DeviceFacts, config: &DetectionConfig) -> DeviceType {
    classify(facts, config).device_type(&facts.snapshot)
}

// =============================================================================
// Tests
// =============================================================================
