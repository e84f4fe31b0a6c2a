use crate::error::model_error::ModelError;
use crate::ReaperEndpoint;

use common::ErrorLocation;

use std::panic::Location;

/// Builder for creating validated ReaperEndpoint instances.
#[derive(Debug, Default)]
pub struct ReaperEndpointBuilder {
    host: Option<String>,
    port: Option<u16>,
}

impl ReaperEndpointBuilder {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the ReaperEndpoint with validation.
    ///
    /// The host ends up verbatim inside every command URL, so anything that would
    /// change the URL structure (scheme, path, whitespace) is rejected here.
    #[track_caller]
    pub fn build(self) -> Result<ReaperEndpoint, ModelError> {
        let host = self.host.ok_or_else(|| ModelError::Validation {
            message: String::from("Host is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let host = host.trim().to_string();

        if host.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Host cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if host.contains("://") {
            return Err(ModelError::Validation {
                message: format!("Host must not include a scheme: {host}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
        {
            return Err(ModelError::Validation {
                message: format!("Invalid host format: {host}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let port = self.port.ok_or_else(|| ModelError::Validation {
            message: String::from("Port is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if port == 0 {
            return Err(ModelError::Validation {
                message: String::from("Port must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ReaperEndpoint { host, port })
    }
}
