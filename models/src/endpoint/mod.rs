//! The DAW control-surface endpoint.

pub mod builder;

/// Path segment the DAW mounts its control surface under.
pub const CONTROL_SURFACE_PATH: &str = "_";

/// Where the DAW's web control surface listens.
///
/// Construct through [`ReaperEndpointBuilder`](builder::ReaperEndpointBuilder) so host
/// and port are validated once, up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperEndpoint {
    host: String,
    port: u16,
}

impl ReaperEndpoint {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, as used for a raw reachability probe.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL every command is appended to: `http://<host>:<port>/_`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/{CONTROL_SURFACE_PATH}", self.host, self.port)
    }
}
