// Copyright 2025 Cowboy AI, LLC.

//! Scheduling configuration for asynchronous drives

use crate::errors::VehicleResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration controlling how asynchronous drives are scheduled
///
/// # Examples
///
/// ```rust
/// use cim_odometer::DriveConfig;
///
/// let config = DriveConfig::from_json(r#"{ "defer_delay_ms": 20 }"#).unwrap();
/// assert_eq!(config.defer_delay().as_millis(), 20);
/// assert!(config.trace_drives);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DriveConfig {
    /// Extra delay, in milliseconds, before a scheduled drive is applied.
    /// Zero applies it on the next scheduling turn.
    pub defer_delay_ms: u64,
    /// Emit a debug event each time a drive reaches the odometer
    pub trace_drives: bool,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            defer_delay_ms: 0,
            trace_drives: true,
        }
    }
}

impl DriveConfig {
    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> VehicleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the deferral delay
    pub fn with_defer_delay(mut self, delay: Duration) -> Self {
        self.defer_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Deferral delay as a [`Duration`]
    pub fn defer_delay(&self) -> Duration {
        Duration::from_millis(self.defer_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero_delay() {
        let config = DriveConfig::default();
        assert_eq!(config.defer_delay(), Duration::ZERO);
        assert!(config.trace_drives);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = DriveConfig::from_json("{}").unwrap();
        assert_eq!(config, DriveConfig::default());

        let config = DriveConfig::from_json(r#"{ "trace_drives": false }"#).unwrap();
        assert!(!config.trace_drives);
        assert_eq!(config.defer_delay_ms, 0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = DriveConfig::from_json(r#"{ "defer_delay_ms": "soon" }"#).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_with_defer_delay() {
        let config = DriveConfig::default().with_defer_delay(Duration::from_millis(15));
        assert_eq!(config.defer_delay_ms, 15);
        assert_eq!(config.defer_delay(), Duration::from_millis(15));
    }

    #[test]
    fn test_schema_names_fields() {
        let schema = schemars::schema_for!(DriveConfig);
        let json = serde_json::to_value(&schema).unwrap();
        let properties = &json["properties"];
        assert!(properties.get("defer_delay_ms").is_some());
        assert!(properties.get("trace_drives").is_some());
    }
}
