//! Detection configuration.
//!
//! [`DetectionConfig::default()`] carries the built-in constants. A TOML file
//! can override any subset of them:
//!
//! ```toml
//! reduced_functionality = false
//! resize_throttle_ms = 150
//!
//! [breakpoints]
//! tablet_s_max_width = 800
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::breakpoints::BreakpointTable;
use crate::error::ConfigError;

/// Resize events are coalesced to one recomputation per this window.
pub const DEFAULT_RESIZE_THROTTLE_MS: u64 = 150;

/// Collapse every non-mobile, non-tablet viewport into DESKTOP.
pub const DEFAULT_REDUCED_FUNCTIONALITY: bool = true;

// =============================================================================
// Detection Config
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Width thresholds.
    pub breakpoints: BreakpointTable,
    /// When true, the width ladder is skipped and unknown devices are DESKTOP.
    pub reduced_functionality: bool,
    /// Throttle window for resize events, in milliseconds.
    pub resize_throttle_ms: u64,
    /// Fire on the first resize of a burst as well as the last.
    pub resize_leading_edge: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::DEFAULT,
            reduced_functionality: DEFAULT_REDUCED_FUNCTIONALITY,
            resize_throttle_ms: DEFAULT_RESIZE_THROTTLE_MS,
            resize_leading_edge: true,
        }
    }
}

impl DetectionConfig {
    /// Defaults with the full width ladder enabled.
    pub fn full_ladder() -> Self {
        Self {
            reduced_functionality: false,
            ..Self::default()
        }
    }

    /// Builder-style override of the reduced-functionality switch.
    pub fn with_reduced_functionality(mut self, enabled: bool) -> Self {
        self.reduced_functionality = enabled;
        self
    }

    /// Builder-style override of the breakpoint table.
    pub fn with_breakpoints(mut self, breakpoints: BreakpointTable) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Resize throttle window as a [`Duration`].
    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: DetectionConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&input)?;
        tracing::debug!(path = %path.display(), ?config, "loaded detection config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.breakpoints.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoints::{TABLET_M_MAX_WIDTH, TV_MAX_WIDTH};

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert!(config.reduced_functionality);
        assert_eq!(config.resize_throttle(), Duration::from_millis(150));
        assert!(config.resize_leading_edge);
        assert_eq!(config.breakpoints, BreakpointTable::DEFAULT);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = DetectionConfig::from_toml_str("").unwrap();
        assert_eq!(config, DetectionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DetectionConfig::from_toml_str(
            r#"
            reduced_functionality = false
            resize_throttle_ms = 50

            [breakpoints]
            tablet_s_max_width = 800
            "#,
        )
        .unwrap();

        assert!(!config.reduced_functionality);
        assert_eq!(config.resize_throttle_ms, 50);
        assert_eq!(config.breakpoints.tablet_s_max_width, 800);
        // Untouched keys keep their defaults
        assert_eq!(config.breakpoints.tablet_m_max_width, TABLET_M_MAX_WIDTH);
        assert_eq!(config.breakpoints.tv_max_width, TV_MAX_WIDTH);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DetectionConfig::from_toml_str("reduced = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_breakpoints_rejected() {
        let err = DetectionConfig::from_toml_str(
            r#"
            [breakpoints]
            laptop_max_width = 5000
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnorderedBreakpoints { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DetectionConfig::load("/definitely/not/here/device.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            reduced_functionality = false
            resize_throttle_ms = 200
            resize_leading_edge = false

            [breakpoints]
            tablet_s_max_width = 800
            "#
        )
        .unwrap();

        let loaded = DetectionConfig::load(file.path()).unwrap();
        let expected = DetectionConfig {
            reduced_functionality: false,
            resize_throttle_ms: 200,
            resize_leading_edge: false,
            breakpoints: BreakpointTable {
                tablet_s_max_width: 800,
                ..BreakpointTable::DEFAULT
            },
        };
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_leading_edge_override() {
        let config = DetectionConfig::from_toml_str("resize_leading_edge = false").unwrap();
        assert!(!config.resize_leading_edge);
        assert_eq!(config.resize_throttle_ms, DEFAULT_RESIZE_THROTTLE_MS);
        assert!(config.reduced_functionality);
    }

    #[test]
    fn test_full_ladder_builder() {
        let config = DetectionConfig::full_ladder();
        assert!(!config.reduced_functionality);
        assert!(config.with_reduced_functionality(true).reduced_functionality);
    }
}
