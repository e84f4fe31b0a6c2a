//! Helpers for driving a real [`JobManager`] against a wiremock DAW.

use common::RedactedSecret;
use models::{ReaperEndpoint, ReaperEndpointBuilder};
use remote_core::{
    HostNetwork, JobExecutor, JobManager, JobQueueSettings, JobResult, ReqwestTransport,
    SystemClock, WifiCredentials,
};

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

pub const WAIT: Duration = Duration::from_secs(10);

pub fn endpoint(address: &SocketAddr) -> ReaperEndpoint {
    ReaperEndpointBuilder::default()
        .with_host(address.ip().to_string())
        .with_port(address.port())
        .build()
        .expect("mock server address is a valid endpoint")
}

/// Manager wired to the mock server with a short request timeout.
///
/// Must be called from a blocking context: the reqwest blocking client cannot
/// be created inside the async runtime.
pub fn start_manager(address: &SocketAddr, request_timeout: Duration) -> JobManager {
    let endpoint = endpoint(address);
    let executor = JobExecutor {
        http: Box::new(
            ReqwestTransport::new(Duration::from_secs(2), request_timeout)
                .expect("Failed to build HTTP client"),
        ),
        network: Box::new(HostNetwork::new(endpoint.clone(), Duration::from_secs(2), 2)),
        credentials: WifiCredentials::new("StageNet".to_string(), RedactedSecret::new("pw")),
        base_url: endpoint.base_url(),
    };
    let settings = JobQueueSettings {
        worker_poll_interval: Duration::from_millis(10),
        ..JobQueueSettings::default()
    };

    JobManager::start(executor, Arc::new(SystemClock::new()), settings)
        .expect("Failed to start job manager")
}

/// Poll until a result with `id` arrives.
pub fn wait_for(manager: &mut JobManager, id: u32) -> JobResult {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if let Some(result) = manager.process_results().into_iter().find(|r| r.id == id) {
            return result;
        }
        sleep(Duration::from_millis(10));
    }
    panic!("No result for job {id} within {WAIT:?}");
}
