//! Runtime configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default queue capacity
pub const DEFAULT_CAPACITY: usize = 3;
/// Default delay between polls of an idle or mismatched worker
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
/// Default interface for the address lookup
pub const DEFAULT_INTERFACE: &str = "eth0";
/// Default RTC character device
pub const DEFAULT_RTC_DEVICE: &str = "/dev/rtc";

/// Configuration errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// File could not be read
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for this schema
    #[error("Cannot parse {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Dispatch configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Fixed queue capacity
    pub capacity: usize,

    /// Worker poll interval in milliseconds
    pub poll_interval_ms: u64,

    /// Interface queried by the address command
    pub interface: String,

    /// RTC device read by the clock commands
    pub rtc_device: PathBuf,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            interface: DEFAULT_INTERFACE.to_owned(),
            rtc_device: PathBuf::from(DEFAULT_RTC_DEVICE),
        }
    }
}

impl DispatchConfig {
    /// Load and validate a JSON config file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "capacity",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.interface.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "interface",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
