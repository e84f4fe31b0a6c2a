//! Asynchronous job core of the setlist remote.
//!
//! The interactive loop must never block on the network, so every request to
//! the DAW goes through a [`JobManager`]: submit a job (non-blocking, returns
//! an id), let the single worker thread perform the blocking HTTP call, then
//! drain finished [`JobResult`]s on a later tick. A [`ConnectionSupervisor`]
//! layered on top brings the network up and fetches the script action id that
//! setlist queries depend on.

pub mod channel;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod jobs;
pub mod manager;
pub mod network;
pub mod supervisor;
pub mod transport;

mod worker;

#[cfg(test)]
mod tests;

pub use channel::Channel;
pub use clock::{Clock, SystemClock};
pub use config::RemoteConfig;
pub use error::CoreError;
pub use jobs::{Job, JobKind, JobOutput, JobRequest, JobResult, PlayAction, TabDirection};
pub use manager::{JobManager, JobQueueSettings, NOT_SUBMITTED};
pub use network::{HostNetwork, NetworkLink, WifiCredentials};
pub use supervisor::{BootstrapJobs, ConnectionPhase, ConnectionSupervisor, SupervisorSettings};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use worker::JobExecutor;
