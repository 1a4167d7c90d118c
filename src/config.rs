// src/config.rs
//! Tracker configuration

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Line-source identifier, e.g. `/dev/ttyUSB0` or `COM3`.
    pub address: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Bounded wait for a single line read; keeps the loop responsive to stop.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new("/dev/ttyUSB0")
    }
}

impl TrackerConfig {
    /// Create a configuration for the given source address with default
    /// baud rate, read timeout, and history capacity.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Load configuration from a JSON file; a missing file yields defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackerError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.read_timeout_ms, 1000);
        assert_eq!(config.history_capacity, 1000);
        assert_eq!(config.read_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_new_overrides_address_only() {
        let config = TrackerConfig::new("COM3");
        assert_eq!(config.address, "COM3");
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrackerConfig = serde_json::from_str(r#"{"address": "/dev/ttyACM0"}"#).unwrap();
        assert_eq!(config.address, "/dev/ttyACM0");
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = TrackerConfig::new("/dev/ttyS1");
        config.baud_rate = 115200;
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.address, "/dev/ttyS1");
        assert_eq!(parsed.baud_rate, 115200);
    }
}
