//! Detection result - the flat view handed to rendering code.

use crate::types::{DeviceCategory, DeviceType, Orientation, OrientationFlags};

const VERTICAL: &str = "_VERTICAL";
const HORIZONTAL: &str = "_HORIZONTAL";

const MOBILE_LABELS: [&str; 3] = ["MOBILE_S", "MOBILE_M", "MOBILE_L"];
const TABLET_LABELS: [&str; 3] = ["TABLET_S", "TABLET_M", "TABLET_L"];

/// Device type plus every derived flag, recomputed together.
///
/// Flags are string tests against the device type label:
///
/// - `is_mobile`, `is_tablet`, `is_desktop` match a label prefix
/// - `*_vertical` / `*_horizontal` need an S/M/L prefix and the suffix
/// - size flags (`is_mobile_s`, `is_laptop`, `is_tv_4k`, ...) match the bare
///   category label exactly, so they only hold when no suffix is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetectionResult {
    pub device_type: DeviceType,
    pub touch_device: bool,
    pub is_portrait: bool,
    pub is_landscape: bool,
    pub orientation: Orientation,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_mobile_vertical: bool,
    pub is_mobile_horizontal: bool,
    pub is_tablet_vertical: bool,
    pub is_tablet_horizontal: bool,
    pub is_mobile_s: bool,
    pub is_mobile_m: bool,
    pub is_mobile_l: bool,
    pub is_tablet_s: bool,
    pub is_tablet_m: bool,
    pub is_tablet_l: bool,
    pub is_laptop: bool,
    pub is_desktop: bool,
    pub is_tv: bool,
    pub is_tv_4k: bool,
}

impl DeviceDetectionResult {
    pub fn from_parts(device_type: DeviceType, orientation: OrientationFlags, touch_device: bool) -> Self {
        let label = device_type.label();
        let label = label.as_str();

        let is_mobile_class = MOBILE_LABELS.iter().any(|prefix| label.starts_with(prefix));
        let is_tablet_class = TABLET_LABELS.iter().any(|prefix| label.starts_with(prefix));
        let exact = |category: DeviceCategory| label == category.label();

        Self {
            device_type,
            touch_device,
            is_portrait: orientation.is_portrait,
            is_landscape: orientation.is_landscape,
            orientation: orientation.orientation(),
            is_mobile: label.starts_with("MOBILE"),
            is_tablet: label.starts_with("TABLET"),
            is_mobile_vertical: is_mobile_class && label.ends_with(VERTICAL),
            is_mobile_horizontal: is_mobile_class && label.ends_with(HORIZONTAL),
            is_tablet_vertical: is_tablet_class && label.ends_with(VERTICAL),
            is_tablet_horizontal: is_tablet_class && label.ends_with(HORIZONTAL),
            is_mobile_s: exact(DeviceCategory::MobileS),
            is_mobile_m: exact(DeviceCategory::MobileM),
            is_mobile_l: exact(DeviceCategory::MobileL),
            is_tablet_s: exact(DeviceCategory::TabletS),
            is_tablet_m: exact(DeviceCategory::TabletM),
            is_tablet_l: exact(DeviceCategory::TabletL),
            is_laptop: exact(DeviceCategory::Laptop),
            is_desktop: label.starts_with(DeviceCategory::Desktop.label()),
            is_tv: exact(DeviceCategory::Tv),
            is_tv_4k: exact(DeviceCategory::Tv4k),
        }
    }

    /// Result reported when there is no host window.
    pub fn inert() -> Self {
        Self::from_parts(DeviceType::EMPTY, OrientationFlags::PORTRAIT_DEFAULT, false)
    }

    /// Device type label, e.g. `"TABLET_M_HORIZONTAL"`.
    pub fn device_type_label(&self) -> String {
        self.device_type.label()
    }
}

impl Default for DeviceDetectionResult {
    fn default() -> Self {
        Self::inert()
    }
}

// =============================================================================
// Tests
// =============================================================================
