//! The single execution context that performs blocking I/O.

use crate::channel::Channel;
use crate::clock::Clock;
use crate::error::manager::ManagerError;
use crate::jobs::{Job, JobContext, JobResult};
use crate::network::{NetworkLink, WifiCredentials};
use crate::transport::HttpTransport;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};

const WORKER_THREAD_NAME: &str = "http_worker";

/// Everything a job needs to run, moved onto the worker thread.
pub struct JobExecutor {
    pub http: Box<dyn HttpTransport>,
    pub network: Box<dyn NetworkLink>,
    pub credentials: WifiCredentials,
    pub base_url: String,
}

impl JobExecutor {
    pub fn run(&self, job: &Job) -> JobResult {
        let ctx = JobContext {
            http: self.http.as_ref(),
            network: self.network.as_ref(),
            credentials: &self.credentials,
            base_url: &self.base_url,
        };
        job.execute(&ctx)
    }
}

pub(crate) struct Worker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn(
        executor: JobExecutor,
        jobs: Channel<Job>,
        results: Channel<JobResult>,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
    ) -> Result<Self, ManagerError> {
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                run_loop(&executor, &jobs, &results, clock.as_ref(), &worker_stop, poll_interval)
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signal the worker and wait for it. At most one in-flight job is finished first.
    pub(crate) fn stop(&mut self) {
        // No wake-up message: an idle worker sees the flag within one poll interval.
        self.stop.store(true, Ordering::SeqCst);

        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("Worker thread panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    executor: &JobExecutor,
    jobs: &Channel<Job>,
    results: &Channel<JobResult>,
    clock: &dyn Clock,
    stop: &AtomicBool,
    poll_interval: Duration,
) {
    info!("Worker thread started");

    while !stop.load(Ordering::SeqCst) {
        let Some(job) = jobs.receive_timeout(poll_interval) else {
            continue;
        };

        debug!("Processing job {} of type {}", job.id, job.kind());

        let mut result = executor.run(&job);
        result.timestamp_ms = clock.now_ms();

        debug!(
            "Job {} ({}) took {} ms",
            result.id,
            result.kind,
            result.latency_ms()
        );

        deliver(results, result, stop, poll_interval);
    }

    info!("Worker thread ended");
}

/// Push a result, waiting for the interactive side to make room rather than dropping it.
fn deliver(
    results: &Channel<JobResult>,
    mut result: JobResult,
    stop: &AtomicBool,
    poll_interval: Duration,
) {
    loop {
        match results.submit_timeout(result, poll_interval) {
            Ok(()) => return,
            Err(returned) => {
                if stop.load(Ordering::SeqCst) {
                    warn!(
                        "Discarding result for job {} ({}) during shutdown",
                        returned.id, returned.kind
                    );
                    return;
                }
                warn!("Result queue full, holding result for job {}", returned.id);
                result = returned;
            }
        }
    }
}
