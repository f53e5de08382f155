//! Core types for spark-device.
//!
//! Everything the detector reads (a [`ViewportSnapshot`]) and everything it
//! publishes (a [`DeviceType`] and [`OrientationFlags`]) lives here.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownDeviceType;

// =============================================================================
// Viewport Snapshot
// =============================================================================

/// Host viewport state, read fresh on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSnapshot {
    /// Inner width in CSS pixels.
    pub width: u32,
    /// Inner height in CSS pixels.
    pub height: u32,
    /// Number of simultaneous touch points the device supports.
    pub touch_points: u32,
}

impl ViewportSnapshot {
    /// Create a snapshot.
    pub const fn new(width: u32, height: u32, touch_points: u32) -> Self {
        Self { width, height, touch_points }
    }

    /// True when the device reports at least one touch point.
    pub const fn is_touch(&self) -> bool {
        self.touch_points > 0
    }

    /// Orientation flags for this snapshot.
    pub const fn orientation(&self) -> OrientationFlags {
        OrientationFlags::from_size(self.width, self.height)
    }
}

// =============================================================================
// Orientation
// =============================================================================

/// Portrait/landscape flags.
///
/// Both are strict comparisons, so a square viewport has neither flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationFlags {
    pub is_portrait: bool,
    pub is_landscape: bool,
}

impl OrientationFlags {
    /// Flags used before any viewport has been measured.
    pub const PORTRAIT_DEFAULT: Self = Self {
        is_portrait: true,
        is_landscape: false,
    };

    /// Derive flags from viewport dimensions.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self {
            is_portrait: height > width,
            is_landscape: width > height,
        }
    }

    /// Public orientation. Anything not portrait reports landscape.
    pub const fn orientation(&self) -> Orientation {
        if self.is_portrait {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Label suffix, `None` for a square viewport.
    pub const fn suffix(&self) -> Option<OrientationSuffix> {
        if self.is_portrait {
            Some(OrientationSuffix::Vertical)
        } else if self.is_landscape {
            Some(OrientationSuffix::Horizontal)
        } else {
            None
        }
    }
}

impl Default for OrientationFlags {
    fn default() -> Self {
        Self::PORTRAIT_DEFAULT
    }
}

/// Coarse orientation as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Orientation part of a device-type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationSuffix {
    Vertical,
    Horizontal,
}

impl OrientationSuffix {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrientationSuffix::Vertical => "_VERTICAL",
            OrientationSuffix::Horizontal => "_HORIZONTAL",
        }
    }
}

// =============================================================================
// Device Category
// =============================================================================

/// Size class of a device, before orientation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceCategory {
    MobileS,
    MobileM,
    MobileL,
    TabletS,
    TabletM,
    TabletL,
    Laptop,
    Desktop,
    Tv,
    Tv4k,
}

impl DeviceCategory {
    /// All categories, smallest first.
    pub const ALL: [DeviceCategory; 10] = [
        DeviceCategory::MobileS,
        DeviceCategory::MobileM,
        DeviceCategory::MobileL,
        DeviceCategory::TabletS,
        DeviceCategory::TabletM,
        DeviceCategory::TabletL,
        DeviceCategory::Laptop,
        DeviceCategory::Desktop,
        DeviceCategory::Tv,
        DeviceCategory::Tv4k,
    ];

    /// Canonical label, e.g. `"TABLET_M"`.
    pub const fn label(&self) -> &'static str {
        match self {
            DeviceCategory::MobileS => "MOBILE_S",
            DeviceCategory::MobileM => "MOBILE_M",
            DeviceCategory::MobileL => "MOBILE_L",
            DeviceCategory::TabletS => "TABLET_S",
            DeviceCategory::TabletM => "TABLET_M",
            DeviceCategory::TabletL => "TABLET_L",
            DeviceCategory::Laptop => "LAPTOP",
            DeviceCategory::Desktop => "DESKTOP",
            DeviceCategory::Tv => "TV",
            DeviceCategory::Tv4k => "TV_4K",
        }
    }

    pub const fn is_mobile(&self) -> bool {
        matches!(
            self,
            DeviceCategory::MobileS | DeviceCategory::MobileM | DeviceCategory::MobileL
        )
    }

    pub const fn is_tablet(&self) -> bool {
        matches!(
            self,
            DeviceCategory::TabletS | DeviceCategory::TabletM | DeviceCategory::TabletL
        )
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

// =============================================================================
// Device Type
// =============================================================================

/// Category plus orientation suffix, e.g. `MOBILE_S_HORIZONTAL`.
///
/// The empty device type (no category) is what the detector publishes
/// before its first classification and when no host window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceType {
    category: Option<DeviceCategory>,
    suffix: Option<OrientationSuffix>,
}

impl DeviceType {
    pub const EMPTY: Self = Self {
        category: None,
        suffix: None,
    };

    pub const fn new(category: DeviceCategory, suffix: Option<OrientationSuffix>) -> Self {
        Self {
            category: Some(category),
            suffix,
        }
    }

    /// Attach the suffix matching the given orientation flags.
    pub const fn oriented(category: DeviceCategory, orientation: OrientationFlags) -> Self {
        Self::new(category, orientation.suffix())
    }

    pub const fn category(&self) -> Option<DeviceCategory> {
        self.category
    }

    pub const fn suffix(&self) -> Option<OrientationSuffix> {
        self.suffix
    }

    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
    }

    /// Full label; empty string for [`DeviceType::EMPTY`].
    pub fn label(&self) -> String {
        match (self.category, self.suffix) {
            (None, _) => String::new(),
            (Some(category), None) => category.label().to_string(),
            (Some(category), Some(suffix)) => format!("{}{}", category.label(), suffix.as_str()),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(DeviceType::EMPTY);
        }

        let (base, suffix) = if let Some(base) = s.strip_suffix(OrientationSuffix::Vertical.as_str()) {
            (base, Some(OrientationSuffix::Vertical))
        } else if let Some(base) = s.strip_suffix(OrientationSuffix::Horizontal.as_str()) {
            (base, Some(OrientationSuffix::Horizontal))
        } else {
            (s, None)
        };

        DeviceCategory::ALL
            .iter()
            .find(|c| c.label() == base)
            .map(|&c| DeviceType::new(c, suffix))
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
