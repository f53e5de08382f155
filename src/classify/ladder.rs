//! Width buckets.

use crate::breakpoints::BreakpointTable;
use crate::types::DeviceCategory;

/// Split a phone by width.
pub fn bucket_mobile(width: u32, table: &BreakpointTable) -> DeviceCategory {
    if width <= table.mobile_s_max_width {
        DeviceCategory::MobileS
    } else if width <= table.mobile_m_max_width {
        DeviceCategory::MobileM
    } else {
        DeviceCategory::MobileL
    }
}

/// Split a tablet by width.
pub fn bucket_tablet(width: u32, table: &BreakpointTable) -> DeviceCategory {
    if width <= table.tablet_s_max_width {
        DeviceCategory::TabletS
    } else if width <= table.tablet_m_max_width {
        DeviceCategory::TabletM
    } else {
        DeviceCategory::TabletL
    }
}

/// Classify by width alone, widest first.
///
/// Widths between `mobile_max_width` and `tablet_s_min_width` fall through
/// to DESKTOP, which cannot happen with the default table.
pub fn width_ladder(width: u32, table: &BreakpointTable) -> DeviceCategory {
    if width > table.tv_max_width {
        DeviceCategory::Tv4k
    } else if width > table.desktop_max_width {
        DeviceCategory::Tv
    } else if width > table.laptop_max_width {
        DeviceCategory::Desktop
    } else if width > table.tablet_l_max_width {
        DeviceCategory::Laptop
    } else if width > table.tablet_m_max_width {
        DeviceCategory::TabletL
    } else if width > table.tablet_s_max_width {
        DeviceCategory::TabletM
    } else if width >= table.tablet_s_min_width {
        DeviceCategory::TabletS
    } else if width > table.mobile_s_max_width && width <= table.mobile_max_width {
        if width <= table.mobile_m_max_width {
            DeviceCategory::MobileM
        } else {
            DeviceCategory::MobileL
        }
    } else if width <= table.mobile_s_max_width {
        DeviceCategory::MobileS
    } else {
        DeviceCategory::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: BreakpointTable = BreakpointTable::DEFAULT;

    #[test]
    fn test_mobile_buckets() {
        assert_eq!(bucket_mobile(1, &T), DeviceCategory::MobileS);
        assert_eq!(bucket_mobile(320, &T), DeviceCategory::MobileS);
        assert_eq!(bucket_mobile(321, &T), DeviceCategory::MobileM);
        assert_eq!(bucket_mobile(380, &T), DeviceCategory::MobileM);
        assert_eq!(bucket_mobile(381, &T), DeviceCategory::MobileL);
        // Large phones stay MOBILE_L however wide they get
        assert_eq!(bucket_mobile(1290, &T), DeviceCategory::MobileL);
    }

    #[test]
    fn test_tablet_buckets() {
        assert_eq!(bucket_tablet(600, &T), DeviceCategory::TabletS);
        assert_eq!(bucket_tablet(834, &T), DeviceCategory::TabletS);
        assert_eq!(bucket_tablet(835, &T), DeviceCategory::TabletM);
        assert_eq!(bucket_tablet(1024, &T), DeviceCategory::TabletM);
        assert_eq!(bucket_tablet(1025, &T), DeviceCategory::TabletL);
    }

    #[test]
    fn test_width_ladder_boundaries() {
        let cases = [
            (320, DeviceCategory::MobileS),
            (321, DeviceCategory::MobileM),
            (380, DeviceCategory::MobileM),
            (381, DeviceCategory::MobileL),
            (767, DeviceCategory::MobileL),
            (768, DeviceCategory::TabletS),
            (834, DeviceCategory::TabletS),
            (835, DeviceCategory::TabletM),
            (1024, DeviceCategory::TabletM),
            (1025, DeviceCategory::TabletL),
            (1280, DeviceCategory::TabletL),
            (1281, DeviceCategory::Laptop),
            (1440, DeviceCategory::Laptop),
            (1441, DeviceCategory::Desktop),
            (1920, DeviceCategory::Desktop),
            (1921, DeviceCategory::Tv),
            (2560, DeviceCategory::Tv),
            (2561, DeviceCategory::Tv4k),
        ];

        for (width, expected) in cases {
            assert_eq!(width_ladder(width, &T), expected, "width {}", width);
        }
    }

    #[test]
    fn test_width_ladder_gap_falls_back_to_desktop() {
        let table = BreakpointTable {
            mobile_max_width: 700,
            ..BreakpointTable::DEFAULT
        };
        assert_eq!(width_ladder(730, &table), DeviceCategory::Desktop);
    }
}
