use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ChannelError {
    #[error("Channel Full Error: capacity {capacity} reached {location}")]
    Full {
        capacity: usize,
        location: ErrorLocation,
    },

    #[error("Channel Disconnected Error: {message} {location}")]
    Disconnected {
        message: String,
        location: ErrorLocation,
    },
}
