//! Shared building blocks for the setlist remote.
//!
//! This crate holds the small pieces every other crate leans on: location-aware
//! errors, HTTP status classification and secret handling. It carries no
//! protocol knowledge and performs no I/O.
//!
//! ## Architecture
//!
//! - **common** (this crate): Error plumbing and secret wrappers
//! - **models**: Pure data exchanged with the DAW
//! - **remote-core**: Job execution, protocol codec, connection bootstrap
//! - **setlist-remote**: Host runner wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
