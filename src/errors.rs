// Copyright 2025 Cowboy AI, LLC.

//! Error types for vehicle operations

use thiserror::Error;

/// Errors that can occur while driving a vehicle or loading its configuration
///
/// Distances themselves are never validated; these errors only cover what the
/// scheduler and the configuration layer can produce.
#[derive(Debug, Clone, Error)]
pub enum VehicleError {
    /// An asynchronous drive was requested without a Tokio runtime to schedule it on
    #[error("No async runtime available to schedule the drive")]
    NoRuntime,

    /// An asynchronous drive was requested on a runtime that could apply it
    /// before the caller yields
    #[error("Drives need a current-thread runtime, found {0}")]
    UnsupportedRuntime(String),

    /// The scheduled drive task was cancelled or panicked before it applied
    #[error("Scheduled drive of {distance} aborted: {reason}")]
    DriveAborted {
        /// Distance the aborted drive would have applied
        distance: f64,
        /// Why the task did not complete
        reason: String,
    },

    /// Drive configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for vehicle operations
pub type VehicleResult<T> = Result<T, VehicleError>;

impl From<serde_json::Error> for VehicleError {
    fn from(err: serde_json::Error) -> Self {
        VehicleError::InvalidConfig(err.to_string())
    }
}

impl VehicleError {
    /// Check if a scheduled drive was cancelled or panicked before it applied
    pub fn is_aborted(&self) -> bool {
        matches!(self, VehicleError::DriveAborted { .. })
    }

    /// Check if the drive was never scheduled because of the runtime
    pub fn is_runtime_error(&self) -> bool {
        matches!(
            self,
            VehicleError::NoRuntime | VehicleError::UnsupportedRuntime(_)
        )
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, VehicleError::InvalidConfig(_))
    }
}
