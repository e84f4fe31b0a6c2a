use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when code tries to write a [`RedactedSecret`](crate::RedactedSecret) out.
#[derive(Debug, ThisError)]
pub enum RedactError {
    /// A serializer was handed the secret
    #[error("Secret Exposure Error: {message} {location}")]
    Exposure {
        message: String,
        location: ErrorLocation,
    },
}
