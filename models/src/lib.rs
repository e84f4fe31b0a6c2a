//! Domain models for the setlist remote.
//!
//! This crate contains pure data structures describing what the DAW reports:
//! transport position, open project tabs and the endpoint we talk to. Models
//! have no business logic - they're just data passed from the job worker to
//! the interactive loop.

pub mod endpoint;
pub mod error;
pub mod reaper_state;
pub mod tab_info;
pub mod transport;

pub use endpoint::ReaperEndpoint;
pub use endpoint::builder::ReaperEndpointBuilder;
pub use error::model_error::ModelError;
pub use reaper_state::ReaperState;
pub use tab_info::TabInfo;
pub use transport::{PlayState, TransportState};

#[cfg(test)]
mod tests;
