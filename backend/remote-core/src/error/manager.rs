use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ManagerError {
    #[error("Worker Spawn Error: {message} {location}")]
    WorkerSpawn {
        message: String,
        location: ErrorLocation,
    },

    #[error("Worker Not Running Error: {message} {location}")]
    NotRunning {
        message: String,
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for ManagerError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        ManagerError::WorkerSpawn {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
