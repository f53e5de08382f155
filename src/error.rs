//! Error types.
//!
//! Detection itself never fails. Loading and validating configuration does.

use std::io;
use std::path::PathBuf;

/// Configuration loading/validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("breakpoint {name} must be greater than zero")]
    ZeroBreakpoint { name: &'static str },

    #[error("breakpoint {lower} ({lower_width}px) must be below {upper} ({upper_width}px)")]
    UnorderedBreakpoints {
        lower: &'static str,
        lower_width: u32,
        upper: &'static str,
        upper_width: u32,
    },
}

/// A label that names no known device type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type label: {0:?}")]
pub struct UnknownDeviceType(pub String);
