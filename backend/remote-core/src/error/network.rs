use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum NetworkError {
    #[error("Address Resolve Error: {message} {location}")]
    Resolve {
        message: String,
        location: ErrorLocation,
    },

    #[error("Host Unreachable Error: {message} {location}")]
    Unreachable {
        message: String,
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for NetworkError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        NetworkError::Unreachable {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
