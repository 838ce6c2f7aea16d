//! Defines the configuration for the wallclock engine.
//!
//! Only ambient behavior is configurable here: log verbosity, whether the
//! scheduling hints are applied, and the shutdown grace delay. The time format
//! and the refresh interval are fixed in [`crate::common`].
//!
//! The binary runs on `WallclockConfig::default()`. An embedding application
//! can build the struct in code or parse it from TOML text it already holds;
//! every missing key takes its default.

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

/// The top-level configuration for the `ClockEngine`.
#[derive(Debug, Clone, Deserialize)]
pub struct WallclockConfig {
    /// An `EnvFilter` directive for the stderr log output.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Schedule the updater below the presenter.
    #[serde(default = "default_priority_hints")]
    pub priority_hints: bool,

    /// How long `run` lingers after cancelling the tasks.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl WallclockConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The shutdown grace delay as a `Duration`.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

impl Default for WallclockConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            priority_hints: default_priority_hints(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

// --- Default value functions for serde ---

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_priority_hints() -> bool {
    true
}

fn default_shutdown_grace_ms() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_defaults() {
        let config = WallclockConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(config.priority_hints);
        assert_eq!(config.shutdown_grace(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_source_keeps_other_defaults() {
        let config = WallclockConfig::from_toml_str(
            r#"
            log_level = "debug"
            priority_hints = false
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(!config.priority_hints);
        assert_eq!(config.shutdown_grace_ms, 50);
    }

    #[test]
    fn test_default_ignores_process_environment() {
        std::env::set_var("WALLCLOCK_SHUTDOWN_GRACE_MS", "soon");
        std::env::set_var("WALLCLOCK_LOG_LEVEL", "trace");

        let config = WallclockConfig::default();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.shutdown_grace_ms, 50);
    }

    #[test]
    fn test_malformed_source_is_config_error() {
        let err = WallclockConfig::from_toml_str("shutdown_grace_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, crate::error::ClockError::Config(_)));
    }
}
