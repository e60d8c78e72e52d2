//! Typed configuration for the board core.
//!
//! The defaults match the fixed product behavior (60 s write cooldown,
//! 1 s history grouping window). An optional YAML file can override them
//! for staging or load-test runs; see [`BoardConfig::load`].

use std::path::Path;

use serde::Deserialize;

use crate::history::GROUPING_WINDOW_MS;
use crate::players::COOLDOWN_DURATION_MS;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Tunable timing parameters for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Minimum interval between a player's successful writes, milliseconds.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: i64,

    /// Writes recorded within this window collapse into one history batch,
    /// milliseconds.
    #[serde(default = "default_grouping_window_ms")]
    pub grouping_window_ms: i64,
}

const fn default_cooldown_ms() -> i64 {
    COOLDOWN_DURATION_MS
}

const fn default_grouping_window_ms() -> i64 {
    GROUPING_WINDOW_MS
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: COOLDOWN_DURATION_MS,
            grouping_window_ms: GROUPING_WINDOW_MS,
        }
    }
}

impl BoardConfig {
    /// Load configuration from a YAML file.
    ///
    /// Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_behavior() {
        let config = BoardConfig::default();
        assert_eq!(config.cooldown_ms, 60_000);
        assert_eq!(config.grouping_window_ms, 1_000);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: BoardConfig =
            serde_yml::from_str("cooldown_ms: 5000\n").unwrap_or_default();
        assert_eq!(config.cooldown_ms, 5_000);
        assert_eq!(config.grouping_window_ms, 1_000);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: BoardConfig = serde_yml::from_str("{}").unwrap_or_default();
        assert_eq!(config, BoardConfig::default());
    }
}
