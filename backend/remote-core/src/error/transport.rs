use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Status Error: {status} {message} {location}")]
    Status {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    /// Whether a later attempt at the same request has a reasonable chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout { .. } | TransportError::Http { .. } => true,
            TransportError::Status { status, .. } => status.is_retryable(),
            TransportError::UrlParse { .. } => false,
        }
    }
}

impl From<url::ParseError> for TransportError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        TransportError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_timeout() {
            TransportError::Timeout {
                message: error.to_string(),
                location,
            }
        } else {
            TransportError::Http {
                message: error.to_string(),
                location,
            }
        }
    }
}
