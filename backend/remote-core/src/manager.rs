//! Interactive-side facade over the job and result queues.
//!
//! Every call here is non-blocking. Construction spawns the worker; dropping
//! the manager (or calling [`JobManager::shutdown`]) stops and joins it, which
//! can take as long as one in-flight request.

use crate::channel::Channel;
use crate::clock::Clock;
use crate::error::manager::ManagerError;
use crate::jobs::{Job, JobRequest, JobResult, PlayAction, TabDirection};
use crate::supervisor::BootstrapJobs;
use crate::worker::{JobExecutor, Worker};

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};

pub const DEFAULT_JOB_QUEUE_CAPACITY: usize = 10;
pub const DEFAULT_RESULT_QUEUE_CAPACITY: usize = 10;
pub const DEFAULT_WORKER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Id returned by a submit that was not accepted.
pub const NOT_SUBMITTED: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobQueueSettings {
    pub job_queue_capacity: usize,
    pub result_queue_capacity: usize,
    /// How long the worker waits for a job before re-checking the stop flag.
    pub worker_poll_interval: Duration,
}

impl Default for JobQueueSettings {
    fn default() -> Self {
        Self {
            job_queue_capacity: DEFAULT_JOB_QUEUE_CAPACITY,
            result_queue_capacity: DEFAULT_RESULT_QUEUE_CAPACITY,
            worker_poll_interval: DEFAULT_WORKER_POLL_INTERVAL,
        }
    }
}

pub struct JobManager {
    jobs: Channel<Job>,
    results: Channel<JobResult>,
    worker: Option<Worker>,
    clock: Arc<dyn Clock>,
    next_id: u32,
    script_action_id: String,
    wifi_connected: bool,
}

impl JobManager {
    /// Create both queues and spawn the worker.
    pub fn start(
        executor: JobExecutor,
        clock: Arc<dyn Clock>,
        settings: JobQueueSettings,
    ) -> Result<Self, ManagerError> {
        let jobs = Channel::bounded(settings.job_queue_capacity);
        let results = Channel::bounded(settings.result_queue_capacity);

        let worker = Worker::spawn(
            executor,
            jobs.clone(),
            results.clone(),
            Arc::clone(&clock),
            settings.worker_poll_interval,
        )?;

        info!(
            "Job manager started (job queue {}, result queue {})",
            jobs.capacity(),
            results.capacity()
        );

        Ok(Self {
            jobs,
            results,
            worker: Some(worker),
            clock,
            next_id: 1,
            script_action_id: String::new(),
            wifi_connected: false,
        })
    }

    pub fn submit_connect_wifi(&mut self) -> u32 {
        self.submit(JobRequest::ConnectWifi)
    }

    pub fn submit_change_tab(&mut self, direction: TabDirection) -> u32 {
        let script_action_id = self.script_action_id.clone();
        self.submit(JobRequest::ChangeTab {
            direction,
            script_action_id,
        })
    }

    pub fn submit_change_playstate(&mut self, action: PlayAction) -> u32 {
        self.submit(JobRequest::ChangePlaystate { action })
    }

    pub fn submit_get_status(&mut self) -> u32 {
        let script_action_id = self.script_action_id.clone();
        self.submit(JobRequest::GetStatus { script_action_id })
    }

    pub fn submit_get_script_action_id(&mut self) -> u32 {
        self.submit(JobRequest::GetScriptActionId)
    }

    pub fn submit_get_transport(&mut self) -> u32 {
        self.submit(JobRequest::GetTransport)
    }

    /// Returns the new job's id, or [`NOT_SUBMITTED`] if the worker is gone or
    /// the job queue is full.
    fn submit(&mut self, request: JobRequest) -> u32 {
        let kind = request.kind();

        if !self.is_running() {
            let e = ManagerError::NotRunning {
                message: format!("Cannot submit {kind} job"),
                location: ErrorLocation::from(Location::caller()),
            };
            error!("{e}");
            return NOT_SUBMITTED;
        }

        let id = self.next_id;
        let job = Job::new(id, self.clock.now_ms(), request);

        match self.jobs.submit(job) {
            Ok(()) => {
                self.next_id = self.next_id.wrapping_add(1).max(1);
                debug!("Submitted {kind} job {id}");
                id
            }
            Err(e) => {
                warn!("Failed to submit {kind} job: {e}");
                NOT_SUBMITTED
            }
        }
    }

    /// Take ownership of every result completed since the last call, in completion order.
    pub fn process_results(&mut self) -> Vec<JobResult> {
        let results = self.results.try_receive_all();
        for result in &results {
            debug!("Processing result for job {} ({})", result.id, result.kind);
        }
        results
    }

    pub fn script_action_id(&self) -> &str {
        &self.script_action_id
    }

    pub fn set_script_action_id(&mut self, script_action_id: impl Into<String>) {
        self.script_action_id = script_action_id.into();
    }

    pub fn is_wifi_connected(&self) -> bool {
        self.wifi_connected
    }

    pub fn set_wifi_connected(&mut self, connected: bool) {
        self.wifi_connected = connected;
    }

    /// Connected and holding a script action id, so setlist queries can succeed.
    pub fn is_ready(&self) -> bool {
        self.wifi_connected && !self.script_action_id.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(Worker::is_running)
    }

    /// Jobs accepted but not yet picked up by the worker.
    pub fn queued_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Stop and join the worker. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            info!("Shutting down job manager");
            worker.stop();
            info!("Job manager shutdown complete");
        }
    }
}

impl Drop for JobManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl BootstrapJobs for JobManager {
    fn submit_connect_wifi(&mut self) -> u32 {
        JobManager::submit_connect_wifi(self)
    }

    fn submit_get_script_action_id(&mut self) -> u32 {
        JobManager::submit_get_script_action_id(self)
    }

    fn set_wifi_connected(&mut self, connected: bool) {
        JobManager::set_wifi_connected(self, connected);
    }

    fn set_script_action_id(&mut self, script_action_id: String) {
        JobManager::set_script_action_id(self, script_action_id);
    }
}
