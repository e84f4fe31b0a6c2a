//! Connection bootstrap: bring up the network, then fetch the script action id.
//!
//! ```text
//! Disconnected -> Connecting -> ConnectedNoToken -> Ready
//!      ^              |               |
//!      +--- failed ---+               +-- attempts exhausted: stays here
//! ```
//!
//! Runs on the interactive side only. It talks to the job queue through
//! [`BootstrapJobs`] and never touches the worker.

use crate::clock::elapsed_at_least;
use crate::jobs::{JobKind, JobResult};
use crate::manager::NOT_SUBMITTED;

use std::fmt;

use log::{debug, error, info, warn};

pub const DEFAULT_WIFI_RETRY_INTERVAL_MS: u32 = 10_000;
pub const DEFAULT_SCRIPT_ID_RETRY_INTERVAL_MS: u32 = 5_000;
pub const DEFAULT_MAX_SCRIPT_ID_ATTEMPTS: u32 = 5;

/// The part of the job facade the supervisor drives.
pub trait BootstrapJobs {
    fn submit_connect_wifi(&mut self) -> u32;
    fn submit_get_script_action_id(&mut self) -> u32;
    fn set_wifi_connected(&mut self, connected: bool);
    fn set_script_action_id(&mut self, script_action_id: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    ConnectedNoToken,
    Ready,
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionPhase::Disconnected => "disconnected",
            ConnectionPhase::Connecting => "connecting",
            ConnectionPhase::ConnectedNoToken => "connected, no script action id",
            ConnectionPhase::Ready => "ready",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSettings {
    pub wifi_retry_interval_ms: u32,
    pub script_id_retry_interval_ms: u32,
    pub max_script_id_attempts: u32,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            wifi_retry_interval_ms: DEFAULT_WIFI_RETRY_INTERVAL_MS,
            script_id_retry_interval_ms: DEFAULT_SCRIPT_ID_RETRY_INTERVAL_MS,
            max_script_id_attempts: DEFAULT_MAX_SCRIPT_ID_ATTEMPTS,
        }
    }
}

#[derive(Debug)]
pub struct ConnectionSupervisor {
    settings: SupervisorSettings,
    phase: ConnectionPhase,
    wifi_connected: bool,
    script_action_id: String,
    script_id_attempts: u32,
    last_wifi_attempt_ms: Option<u32>,
    last_script_id_attempt_ms: Option<u32>,
    pending_wifi_job: Option<u32>,
    pending_script_id_job: Option<u32>,
    exhaustion_reported: bool,
}

impl ConnectionSupervisor {
    pub fn new(settings: SupervisorSettings) -> Self {
        Self {
            settings,
            phase: ConnectionPhase::Disconnected,
            wifi_connected: false,
            script_action_id: String::new(),
            script_id_attempts: 0,
            last_wifi_attempt_ms: None,
            last_script_id_attempt_ms: None,
            pending_wifi_job: None,
            pending_script_id_job: None,
            exhaustion_reported: false,
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == ConnectionPhase::Ready
    }

    pub fn wifi_connected(&self) -> bool {
        self.wifi_connected
    }

    /// Empty until fetched.
    pub fn script_action_id(&self) -> &str {
        &self.script_action_id
    }

    pub fn script_id_attempts(&self) -> u32 {
        self.script_id_attempts
    }

    /// The script id fetch gave up; only a restart recovers from this.
    pub fn is_exhausted(&self) -> bool {
        self.phase == ConnectionPhase::ConnectedNoToken
            && self.pending_script_id_job.is_none()
            && self.script_id_attempts >= self.settings.max_script_id_attempts
    }

    /// Submit whatever bootstrap job is due. Call once per loop tick.
    pub fn tick<J: BootstrapJobs>(&mut self, now_ms: u32, jobs: &mut J) {
        match self.phase {
            ConnectionPhase::Disconnected | ConnectionPhase::Connecting => {
                self.tick_wifi(now_ms, jobs)
            }
            ConnectionPhase::ConnectedNoToken => self.tick_script_id(now_ms, jobs),
            ConnectionPhase::Ready => {}
        }
    }

    fn tick_wifi<J: BootstrapJobs>(&mut self, now_ms: u32, jobs: &mut J) {
        if self.pending_wifi_job.is_some() {
            return;
        }

        let due = self.last_wifi_attempt_ms.is_none_or(|last| {
            elapsed_at_least(now_ms, last, self.settings.wifi_retry_interval_ms)
        });
        if !due {
            return;
        }

        let id = jobs.submit_connect_wifi();
        if id == NOT_SUBMITTED {
            debug!("WiFi connect job not accepted, retrying next tick");
            return;
        }

        self.pending_wifi_job = Some(id);
        self.last_wifi_attempt_ms = Some(now_ms);
        self.transition(ConnectionPhase::Connecting);
    }

    fn tick_script_id<J: BootstrapJobs>(&mut self, now_ms: u32, jobs: &mut J) {
        if self.pending_script_id_job.is_some() {
            return;
        }

        if self.script_id_attempts >= self.settings.max_script_id_attempts {
            if !self.exhaustion_reported {
                error!(
                    "Giving up on script action id after {} attempts; restart required",
                    self.script_id_attempts
                );
                self.exhaustion_reported = true;
            }
            return;
        }

        let due = self.last_script_id_attempt_ms.is_none_or(|last| {
            elapsed_at_least(now_ms, last, self.settings.script_id_retry_interval_ms)
        });
        if !due {
            return;
        }

        let id = jobs.submit_get_script_action_id();
        if id == NOT_SUBMITTED {
            debug!("Script action id job not accepted, retrying next tick");
            return;
        }

        self.script_id_attempts += 1;
        self.pending_script_id_job = Some(id);
        self.last_script_id_attempt_ms = Some(now_ms);
        debug!(
            "Script action id attempt {}/{}",
            self.script_id_attempts, self.settings.max_script_id_attempts
        );
    }

    /// Feed a drained result. Results the supervisor did not submit are ignored.
    pub fn handle_result<J: BootstrapJobs>(&mut self, result: &JobResult, jobs: &mut J) {
        match result.kind {
            JobKind::ConnectWifi if self.pending_wifi_job == Some(result.id) => {
                self.pending_wifi_job = None;
                self.on_wifi_result(result, jobs);
            }
            JobKind::GetScriptActionId if self.pending_script_id_job == Some(result.id) => {
                self.pending_script_id_job = None;
                self.on_script_id_result(result, jobs);
            }
            _ => {}
        }
    }

    fn on_wifi_result<J: BootstrapJobs>(&mut self, result: &JobResult, jobs: &mut J) {
        let connected = result.success && result.wifi_status().is_some_and(|s| s.connected);

        if !connected {
            warn!(
                "WiFi connect failed, retrying in {} ms",
                self.settings.wifi_retry_interval_ms
            );
            self.transition(ConnectionPhase::Disconnected);
            return;
        }

        if let Some(ip) = result.wifi_status().and_then(|s| s.ip_address.as_deref()) {
            info!("WiFi connected, IP {ip}");
        }

        self.wifi_connected = true;
        jobs.set_wifi_connected(true);
        self.script_id_attempts = 0;
        self.last_script_id_attempt_ms = None;
        self.exhaustion_reported = false;
        self.transition(ConnectionPhase::ConnectedNoToken);
    }

    fn on_script_id_result<J: BootstrapJobs>(&mut self, result: &JobResult, jobs: &mut J) {
        match result.script_action_id().filter(|_| result.success) {
            Some(script_action_id) => {
                self.script_action_id = script_action_id.to_string();
                jobs.set_script_action_id(self.script_action_id.clone());
                self.script_id_attempts = 0;
                self.transition(ConnectionPhase::Ready);
            }
            None => warn!(
                "Script action id attempt {}/{} failed",
                self.script_id_attempts, self.settings.max_script_id_attempts
            ),
        }
    }

    fn transition(&mut self, next: ConnectionPhase) {
        if self.phase != next {
            info!("Connection: {} -> {}", self.phase, next);
            self.phase = next;
        }
    }
}

impl Default for ConnectionSupervisor {
    fn default() -> Self {
        Self::new(SupervisorSettings::default())
    }
}
