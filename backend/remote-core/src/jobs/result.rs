use crate::jobs::JobKind;

use models::{ReaperState, TransportState};

/// Outcome of a WiFi bring-up attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiStatus {
    pub connected: bool,
    pub ip_address: Option<String>,
}

/// Kind-specific payload of a [`JobResult`].
///
/// Failed jobs still carry the variant for their kind, holding default values.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    ConnectWifi(WifiStatus),
    ChangeTab {
        reaper_state: ReaperState,
        transport: TransportState,
    },
    ChangePlaystate(TransportState),
    GetStatus {
        reaper_state: ReaperState,
        transport: TransportState,
    },
    GetScriptActionId(Option<String>),
    GetTransport(TransportState),
}

impl JobOutput {
    /// Payload a failed job of `kind` reports.
    pub fn empty(kind: JobKind) -> Self {
        match kind {
            JobKind::ConnectWifi => JobOutput::ConnectWifi(WifiStatus::default()),
            JobKind::ChangeTab => JobOutput::ChangeTab {
                reaper_state: ReaperState::default(),
                transport: TransportState::default(),
            },
            JobKind::ChangePlaystate => JobOutput::ChangePlaystate(TransportState::default()),
            JobKind::GetStatus => JobOutput::GetStatus {
                reaper_state: ReaperState::default(),
                transport: TransportState::default(),
            },
            JobKind::GetScriptActionId => JobOutput::GetScriptActionId(None),
            JobKind::GetTransport => JobOutput::GetTransport(TransportState::default()),
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobOutput::ConnectWifi(_) => JobKind::ConnectWifi,
            JobOutput::ChangeTab { .. } => JobKind::ChangeTab,
            JobOutput::ChangePlaystate(_) => JobKind::ChangePlaystate,
            JobOutput::GetStatus { .. } => JobKind::GetStatus,
            JobOutput::GetScriptActionId(_) => JobKind::GetScriptActionId,
            JobOutput::GetTransport(_) => JobKind::GetTransport,
        }
    }
}

/// What the worker hands back for every executed job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    /// Id of the originating job.
    pub id: u32,
    pub kind: JobKind,
    pub success: bool,
    /// Monotonic ms when the job was submitted.
    pub submitted_at_ms: u32,
    /// Monotonic ms when the worker finished the job.
    pub timestamp_ms: u32,
    pub output: JobOutput,
}

impl JobResult {
    /// Time between submission and completion, tolerant of clock wrap-around.
    pub fn latency_ms(&self) -> u32 {
        self.timestamp_ms.wrapping_sub(self.submitted_at_ms)
    }

    pub fn wifi_status(&self) -> Option<&WifiStatus> {
        match &self.output {
            JobOutput::ConnectWifi(status) => Some(status),
            _ => None,
        }
    }

    /// Setlist snapshot carried by ChangeTab and GetStatus results.
    pub fn reaper_state(&self) -> Option<&ReaperState> {
        match &self.output {
            JobOutput::ChangeTab { reaper_state, .. } | JobOutput::GetStatus { reaper_state, .. } => {
                Some(reaper_state)
            }
            _ => None,
        }
    }

    /// Transport snapshot carried by every result except ConnectWifi and GetScriptActionId.
    pub fn transport(&self) -> Option<&TransportState> {
        match &self.output {
            JobOutput::ChangeTab { transport, .. }
            | JobOutput::GetStatus { transport, .. }
            | JobOutput::ChangePlaystate(transport)
            | JobOutput::GetTransport(transport) => Some(transport),
            _ => None,
        }
    }

    pub fn script_action_id(&self) -> Option<&str> {
        match &self.output {
            JobOutput::GetScriptActionId(id) => id.as_deref(),
            _ => None,
        }
    }
}
