//! The six job kinds and how each one is executed.
//!
//! A [`Job`] only carries the data needed to build its request. Executing it
//! performs exactly one blocking call (HTTP GET, or the network link for WiFi
//! bring-up) and always produces exactly one [`JobResult`]. Failures are
//! logged here and reported as `success = false`; no error leaves this module.

pub mod result;
pub mod setlist;

pub use result::{JobOutput, JobResult, WifiStatus};

use crate::codec::{self, commands};
use crate::error::CoreError;
use crate::error::protocol::ProtocolError;
use crate::network::{NetworkLink, WifiCredentials};
use crate::transport::{HttpTransport, fetch_text};

use common::ErrorLocation;

use std::fmt;
use std::panic::Location;

use log::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Next,
    Previous,
}

impl TabDirection {
    pub fn action(self) -> &'static str {
        match self {
            TabDirection::Next => commands::ACTION_NEXT_TAB,
            TabDirection::Previous => commands::ACTION_PREVIOUS_TAB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAction {
    Play,
    Stop,
}

impl PlayAction {
    pub fn action(self) -> &'static str {
        match self {
            PlayAction::Play => commands::ACTION_PLAY,
            PlayAction::Stop => commands::ACTION_STOP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    ConnectWifi,
    ChangeTab,
    ChangePlaystate,
    GetStatus,
    GetScriptActionId,
    GetTransport,
}

impl JobKind {
    /// Stable name used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            JobKind::ConnectWifi => "WiFiConnect",
            JobKind::ChangeTab => "ChangeTab",
            JobKind::ChangePlaystate => "ChangePlaystate",
            JobKind::GetStatus => "GetStatus",
            JobKind::GetScriptActionId => "GetScriptActionId",
            JobKind::GetTransport => "GetTransport",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind plus payload. Script action ids are copied in at construction so the
/// worker never shares the interactive side's copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRequest {
    ConnectWifi,
    ChangeTab {
        direction: TabDirection,
        script_action_id: String,
    },
    ChangePlaystate {
        action: PlayAction,
    },
    GetStatus {
        script_action_id: String,
    },
    GetScriptActionId,
    GetTransport,
}

impl JobRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::ConnectWifi => JobKind::ConnectWifi,
            JobRequest::ChangeTab { .. } => JobKind::ChangeTab,
            JobRequest::ChangePlaystate { .. } => JobKind::ChangePlaystate,
            JobRequest::GetStatus { .. } => JobKind::GetStatus,
            JobRequest::GetScriptActionId => JobKind::GetScriptActionId,
            JobRequest::GetTransport => JobKind::GetTransport,
        }
    }

    /// URL this request is sent to, or `None` for out-of-band WiFi bring-up.
    pub fn url(&self, base_url: &str) -> Option<String> {
        match self {
            JobRequest::ConnectWifi => None,
            JobRequest::ChangeTab {
                direction,
                script_action_id,
            } => Some(codec::build_batch_url(
                base_url,
                &setlist::batch_commands(Some(direction.action()), script_action_id),
            )),
            JobRequest::ChangePlaystate { action } => Some(codec::build_batch_url(
                base_url,
                &[action.action(), commands::TRANSPORT],
            )),
            JobRequest::GetStatus { script_action_id } => Some(codec::build_batch_url(
                base_url,
                &setlist::batch_commands(None, script_action_id),
            )),
            JobRequest::GetScriptActionId => {
                Some(codec::build_url(base_url, commands::GET_SCRIPT_ACTION_ID))
            }
            JobRequest::GetTransport => Some(codec::build_url(base_url, commands::TRANSPORT)),
        }
    }
}

/// Capabilities a job may use while executing. Owned by the worker.
pub struct JobContext<'a> {
    pub http: &'a dyn HttpTransport,
    pub network: &'a dyn NetworkLink,
    pub credentials: &'a WifiCredentials,
    pub base_url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Never 0.
    pub id: u32,
    pub submitted_at_ms: u32,
    pub request: JobRequest,
}

impl Job {
    pub fn new(id: u32, submitted_at_ms: u32, request: JobRequest) -> Self {
        Self {
            id,
            submitted_at_ms,
            request,
        }
    }

    pub fn kind(&self) -> JobKind {
        self.request.kind()
    }

    /// Run the job. The returned result has `timestamp_ms` unset; the worker stamps it.
    pub fn execute(&self, ctx: &JobContext<'_>) -> JobResult {
        let kind = self.kind();
        debug!("Executing job {} ({kind})", self.id);

        let outcome = match &self.request {
            JobRequest::ConnectWifi => Ok(connect_wifi(ctx)),
            other => self.execute_http(other, ctx),
        };

        let (success, output) = match outcome {
            Ok(JobOutput::ConnectWifi(status)) => {
                (status.connected, JobOutput::ConnectWifi(status))
            }
            Ok(output) => (true, output),
            Err(e) => {
                log_failure(self.id, kind, &e);
                (false, JobOutput::empty(kind))
            }
        };

        debug!("Job {} ({kind}) finished: success={success}", self.id);

        JobResult {
            id: self.id,
            kind,
            success,
            submitted_at_ms: self.submitted_at_ms,
            timestamp_ms: 0,
            output,
        }
    }

    fn execute_http(
        &self,
        request: &JobRequest,
        ctx: &JobContext<'_>,
    ) -> Result<JobOutput, CoreError> {
        let url = request.url(ctx.base_url).ok_or_else(|| ProtocolError::Shape {
            message: format!("{} has no HTTP request", request.kind()),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let body = fetch_text(ctx.http, &url)?;

        let output = match request {
            JobRequest::ChangeTab { .. } => {
                let (reaper_state, transport) = setlist::parse_reply(&body)?;
                debug!("Parsed {} tabs", reaper_state.tabs.len());
                JobOutput::ChangeTab {
                    reaper_state,
                    transport,
                }
            }
            JobRequest::GetStatus { .. } => {
                let (reaper_state, transport) = setlist::parse_reply(&body)?;
                debug!("Parsed {} tabs", reaper_state.tabs.len());
                JobOutput::GetStatus {
                    reaper_state,
                    transport,
                }
            }
            JobRequest::ChangePlaystate { .. } => {
                let lines = codec::parse_batch(&body);
                let first = lines.first().ok_or_else(|| ProtocolError::Shape {
                    message: String::from("Playstate reply has no lines"),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                JobOutput::ChangePlaystate(codec::try_parse_transport(&codec::parse_single(
                    first,
                ))?)
            }
            JobRequest::GetScriptActionId => {
                let tokens = codec::parse_single(&body);
                let id = codec::parse_ext_state(
                    &tokens,
                    commands::SETLIST_NAMESPACE,
                    commands::KEY_SCRIPT_ACTION_ID,
                )
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ProtocolError::Shape {
                    message: String::from("Invalid script action id reply"),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                info!("Got script action id: {id}");
                JobOutput::GetScriptActionId(Some(id))
            }
            JobRequest::GetTransport => {
                let transport = codec::try_parse_transport(&codec::parse_single(&body))?;
                debug!(
                    "Transport: {} at {:.2}s",
                    transport.play_state, transport.position_seconds
                );
                JobOutput::GetTransport(transport)
            }
            JobRequest::ConnectWifi => JobOutput::empty(JobKind::ConnectWifi),
        };

        Ok(output)
    }
}

fn connect_wifi(ctx: &JobContext<'_>) -> JobOutput {
    info!("Connecting to network '{}'", ctx.credentials.ssid);

    let connected = ctx.network.connect(ctx.credentials) && ctx.network.is_connected();
    let ip_address = if connected { ctx.network.local_ip() } else { None };

    if connected {
        info!(
            "Network connected, local address {}",
            ip_address.as_deref().unwrap_or("unknown")
        );
    } else {
        error!("Failed to connect to network '{}'", ctx.credentials.ssid);
    }

    JobOutput::ConnectWifi(WifiStatus {
        connected,
        ip_address,
    })
}

fn log_failure(id: u32, kind: JobKind, error: &CoreError) {
    match error {
        CoreError::Transport(e) if e.is_retryable() => {
            warn!("Job {id} ({kind}) failed, DAW busy or unreachable: {e}")
        }
        CoreError::Transport(e) => error!("Job {id} ({kind}) request failed: {e}"),
        CoreError::Protocol(e) => error!("Job {id} ({kind}) reply rejected: {e}"),
        other => error!("Job {id} ({kind}) failed: {other}"),
    }
}
