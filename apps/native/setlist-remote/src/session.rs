//! The interactive loop: one job manager, one supervisor, one poller, one state.

use crate::app_state::AppState;
use crate::error::RemoteError;
use crate::poller::StatusPoller;

use common::ErrorLocation;
use remote_core::{
    Clock, ConnectionSupervisor, HostNetwork, JobExecutor, JobManager, RemoteConfig,
    ReqwestTransport, SupervisorSettings, SystemClock,
};

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::{MissedTickBehavior, interval};

pub struct Session {
    manager: JobManager,
    supervisor: ConnectionSupervisor,
    poller: StatusPoller,
    state: AppState,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Build the HTTP client, network link and worker from `config`.
    ///
    /// Call outside any async runtime; the blocking HTTP client refuses to be
    /// created inside one.
    pub fn start(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let endpoint = config.endpoint()?;
        let http = ReqwestTransport::new(config.http_connect_timeout(), config.http_timeout())?;
        let network = HostNetwork::new(
            endpoint.clone(),
            config.wifi_connect_timeout(),
            config.wifi.connect_attempts,
        );

        info!("DAW endpoint: {}", endpoint.base_url());

        let executor = JobExecutor {
            http: Box::new(http),
            network: Box::new(network),
            credentials: config.credentials(),
            base_url: endpoint.base_url(),
        };
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let manager = JobManager::start(executor, Arc::clone(&clock), config.queue_settings())?;

        Ok(Self::new(manager, config.supervisor_settings(), clock))
    }

    pub fn new(manager: JobManager, settings: SupervisorSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            manager,
            supervisor: ConnectionSupervisor::new(settings),
            poller: StatusPoller::new(),
            state: AppState::new(),
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn supervisor(&self) -> &ConnectionSupervisor {
        &self.supervisor
    }

    pub fn manager(&self) -> &JobManager {
        &self.manager
    }

    /// One loop iteration. Never blocks.
    pub fn tick(&mut self) {
        let now_ms = self.clock.now_ms();

        self.supervisor.tick(now_ms, &mut self.manager);
        self.poller.tick(
            now_ms,
            self.manager.is_ready(),
            self.state.is_playing(),
            &mut self.manager,
        );

        for result in self.manager.process_results() {
            debug!(
                "{} job {} finished in {} ms (success: {})",
                result.kind,
                result.id,
                result.latency_ms(),
                result.success
            );
            self.supervisor.handle_result(&result, &mut self.manager);
            self.poller.handle_result(&result);
            self.state.apply(&result);
        }
    }

    /// Stop and join the worker. Call outside any async runtime.
    pub fn shutdown(mut self) {
        self.manager.shutdown();
    }
}

/// Tick `session` every `tick` until `shutdown` resolves.
pub async fn run_until<F>(session: &mut Session, tick: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => session.tick(),
            () = &mut shutdown => break,
        }
    }
}

/// Tick `session` every `tick` until Ctrl-C.
pub async fn run_until_ctrl_c(session: &mut Session, tick: Duration) -> Result<(), RemoteError> {
    let mut signal_error = None;

    run_until(session, tick, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(e) => {
                warn!("Failed to listen for Ctrl-C: {e}");
                signal_error = Some(e);
            }
        }
    })
    .await;

    match signal_error {
        Some(e) => Err(RemoteError::Setup {
            message: format!("Failed to listen for Ctrl-C: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Ok(()),
    }
}
