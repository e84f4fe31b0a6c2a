use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// A reply arrived but did not have the expected layout.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
    #[error("Protocol Shape Error: {message} {location}")]
    Shape {
        message: String,
        location: ErrorLocation,
    },

    #[error("Protocol Value Error: {message} {location}")]
    Value {
        message: String,
        location: ErrorLocation,
    },

    #[error("Protocol JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ProtocolError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ProtocolError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ProtocolError::Value {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
