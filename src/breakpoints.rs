//! Breakpoint table - pixel widths separating device categories.
//!
//! The constants are the built-in defaults. A [`BreakpointTable`] is built
//! once (from defaults or from configuration) and never mutated while a
//! detector is active.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Default Thresholds
// =============================================================================

pub const MOBILE_S_MAX_WIDTH: u32 = 320;
pub const MOBILE_M_MAX_WIDTH: u32 = 380;
pub const MOBILE_MAX_WIDTH: u32 = 767;
pub const TABLET_S_MIN_WIDTH: u32 = 768;
pub const TABLET_S_MAX_WIDTH: u32 = 834;
pub const TABLET_M_MAX_WIDTH: u32 = 1024;
pub const TABLET_L_MAX_WIDTH: u32 = 1280;
pub const LAPTOP_MAX_WIDTH: u32 = 1440;
pub const DESKTOP_MAX_WIDTH: u32 = 1920;
pub const TV_MAX_WIDTH: u32 = 2560;

// =============================================================================
// Breakpoint Table
// =============================================================================

/// Named width thresholds, all inclusive upper bounds except
/// `tablet_s_min_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointTable {
    pub mobile_s_max_width: u32,
    pub mobile_m_max_width: u32,
    pub mobile_max_width: u32,
    pub tablet_s_min_width: u32,
    pub tablet_s_max_width: u32,
    pub tablet_m_max_width: u32,
    pub tablet_l_max_width: u32,
    pub laptop_max_width: u32,
    pub desktop_max_width: u32,
    pub tv_max_width: u32,
}

impl BreakpointTable {
    /// The built-in thresholds.
    pub const DEFAULT: Self = Self {
        mobile_s_max_width: MOBILE_S_MAX_WIDTH,
        mobile_m_max_width: MOBILE_M_MAX_WIDTH,
        mobile_max_width: MOBILE_MAX_WIDTH,
        tablet_s_min_width: TABLET_S_MIN_WIDTH,
        tablet_s_max_width: TABLET_S_MAX_WIDTH,
        tablet_m_max_width: TABLET_M_MAX_WIDTH,
        tablet_l_max_width: TABLET_L_MAX_WIDTH,
        laptop_max_width: LAPTOP_MAX_WIDTH,
        desktop_max_width: DESKTOP_MAX_WIDTH,
        tv_max_width: TV_MAX_WIDTH,
    };

    /// Thresholds in ladder order, paired with their names.
    pub fn ordered(&self) -> [(&'static str, u32); 10] {
        [
            ("mobile_s_max_width", self.mobile_s_max_width),
            ("mobile_m_max_width", self.mobile_m_max_width),
            ("mobile_max_width", self.mobile_max_width),
            ("tablet_s_min_width", self.tablet_s_min_width),
            ("tablet_s_max_width", self.tablet_s_max_width),
            ("tablet_m_max_width", self.tablet_m_max_width),
            ("tablet_l_max_width", self.tablet_l_max_width),
            ("laptop_max_width", self.laptop_max_width),
            ("desktop_max_width", self.desktop_max_width),
            ("tv_max_width", self.tv_max_width),
        ]
    }

    /// Check that every threshold is non-zero and strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.ordered();

        if let Some(&(name, _)) = ordered.iter().find(|(_, width)| *width == 0) {
            return Err(ConfigError::ZeroBreakpoint { name });
        }

        for pair in ordered.windows(2) {
            let (lower, lower_width) = pair[0];
            let (upper, upper_width) = pair[1];
            if lower_width >= upper_width {
                return Err(ConfigError::UnorderedBreakpoints {
                    lower,
                    lower_width,
                    upper,
                    upper_width,
                });
            }
        }

        Ok(())
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Tests
// =============================================================================
