use common::ErrorLocation;
use remote_core::CoreError;
use remote_core::error::config::ConfigError;
use remote_core::error::manager::ManagerError;
use remote_core::error::transport::TransportError;

use std::panic::Location;

use thiserror::Error;

/// Errors that stop the runner.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Process setup: directories, runtime, signal handling
    #[error("Setup Error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },

    /// Config file or environment overrides
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Job core failed to come up
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl From<ConfigError> for RemoteError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        RemoteError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for RemoteError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        RemoteError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TransportError> for RemoteError {
    #[track_caller]
    fn from(error: TransportError) -> Self {
        RemoteError::Core {
            message: format!("Failed to build HTTP client: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ManagerError> for RemoteError {
    #[track_caller]
    fn from(error: ManagerError) -> Self {
        RemoteError::Core {
            message: format!("Failed to start job manager: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for RemoteError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        RemoteError::Setup {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
