//! When to ask the DAW for fresh state once the connection is ready.

use remote_core::clock::elapsed_at_least;
use remote_core::{JobKind, JobManager, JobResult, NOT_SUBMITTED};

use log::debug;

/// Status interval until the first successful status reply.
pub const STATUS_POLL_INITIAL_MS: u32 = 1_000;
/// Status interval after that.
pub const STATUS_POLL_STEADY_MS: u32 = 10_000;
/// Transport interval while playing.
pub const TRANSPORT_POLL_MS: u32 = 1_000;

/// The submissions the poller needs.
pub trait StatusJobs {
    fn submit_get_status(&mut self) -> u32;
    fn submit_get_transport(&mut self) -> u32;
}

impl StatusJobs for JobManager {
    fn submit_get_status(&mut self) -> u32 {
        JobManager::submit_get_status(self)
    }

    fn submit_get_transport(&mut self) -> u32 {
        JobManager::submit_get_transport(self)
    }
}

/// Keeps at most one status and one transport query in flight.
#[derive(Debug, Default)]
pub struct StatusPoller {
    pending_status: Option<u32>,
    pending_transport: Option<u32>,
    last_status_ms: Option<u32>,
    last_transport_ms: Option<u32>,
    has_status: bool,
}

impl StatusPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful setlist reply has arrived at least once.
    pub fn has_status(&self) -> bool {
        self.has_status
    }

    pub fn status_interval_ms(&self) -> u32 {
        if self.has_status {
            STATUS_POLL_STEADY_MS
        } else {
            STATUS_POLL_INITIAL_MS
        }
    }

    pub fn tick<J: StatusJobs>(&mut self, now_ms: u32, ready: bool, playing: bool, jobs: &mut J) {
        if !ready {
            return;
        }

        let interval = self.status_interval_ms();
        if self.pending_status.is_none()
            && self
                .last_status_ms
                .is_none_or(|last| elapsed_at_least(now_ms, last, interval))
        {
            let id = jobs.submit_get_status();
            if id != NOT_SUBMITTED {
                self.pending_status = Some(id);
                self.last_status_ms = Some(now_ms);
            }
        }

        if playing
            && self.pending_transport.is_none()
            && self
                .last_transport_ms
                .is_none_or(|last| elapsed_at_least(now_ms, last, TRANSPORT_POLL_MS))
        {
            let id = jobs.submit_get_transport();
            if id != NOT_SUBMITTED {
                self.pending_transport = Some(id);
                self.last_transport_ms = Some(now_ms);
            }
        }
    }

    /// Feed a drained result. A successful tab change also counts as a status reply.
    pub fn handle_result(&mut self, result: &JobResult) {
        match result.kind {
            JobKind::GetStatus if self.pending_status == Some(result.id) => {
                self.pending_status = None;
            }
            JobKind::GetTransport if self.pending_transport == Some(result.id) => {
                self.pending_transport = None;
            }
            _ => {}
        }

        let setlist_ok = result.success && result.reaper_state().is_some_and(|s| s.success);
        if setlist_ok && !self.has_status {
            debug!(
                "First status received, polling every {STATUS_POLL_STEADY_MS} ms from now on"
            );
            self.has_status = true;
        }
    }
}
