use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown Play State Error: {value} {location}")]
    UnknownPlayState { value: i32, location: ErrorLocation },
}
