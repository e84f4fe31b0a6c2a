use crate::jobs::{JobKind, JobResult, PlayAction, TabDirection};
use crate::manager::{JobManager, JobQueueSettings, NOT_SUBMITTED};
use crate::tests::support::{BASE_URL, FakeClock, FakeNetwork, FakeTransport, credentials, response};
use crate::worker::JobExecutor;

use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded};

const WAIT: Duration = Duration::from_secs(5);

fn settings(job_queue_capacity: usize, result_queue_capacity: usize) -> JobQueueSettings {
    JobQueueSettings {
        job_queue_capacity,
        result_queue_capacity,
        worker_poll_interval: Duration::from_millis(10),
    }
}

fn start(transport: FakeTransport, settings: JobQueueSettings) -> JobManager {
    let executor = JobExecutor {
        http: Box::new(transport),
        network: Box::new(FakeNetwork::up()),
        credentials: credentials(),
        base_url: BASE_URL.to_string(),
    };
    JobManager::start(executor, Arc::new(FakeClock::at(1_000)), settings).unwrap()
}

fn drain_until(manager: &mut JobManager, expected: usize) -> Vec<JobResult> {
    let deadline = Instant::now() + WAIT;
    let mut collected = Vec::new();
    while collected.len() < expected && Instant::now() < deadline {
        collected.extend(manager.process_results());
        sleep(Duration::from_millis(5));
    }
    collected
}

/// Transport that signals when a request starts and blocks until released.
fn gated_transport() -> (FakeTransport, Receiver<()>, Sender<()>) {
    let (entered_tx, entered_rx) = bounded::<()>(64);
    let (release_tx, release_rx) = bounded::<()>(64);
    let transport = FakeTransport::new(move |_| {
        let _ = entered_tx.send(());
        let _ = release_rx.recv_timeout(WAIT);
        Ok(response(200, "TRANSPORT\t0\t0\t0\t1.1.00\n"))
    });
    (transport, entered_rx, release_tx)
}

/// **VALUE**: Ids are non-zero and strictly increasing while capacity remains.
///
/// **WHY THIS MATTERS**: 0 means "not submitted"; callers match results to
/// submissions by id.
///
/// **BUG THIS CATCHES**: Would catch ids starting at 0 or being reused.
#[test]
fn given_capacity_when_submitting_many_jobs_then_ids_nonzero_and_increasing() {
    // GIVEN
    let mut manager = start(FakeTransport::ok("TRANSPORT\t0\t0\t0\t1.1.00\n"), settings(32, 32));

    // WHEN
    let ids = vec![
        manager.submit_get_transport(),
        manager.submit_change_playstate(PlayAction::Play),
        manager.submit_get_script_action_id(),
        manager.submit_get_status(),
        manager.submit_change_tab(TabDirection::Next),
        manager.submit_connect_wifi(),
    ];

    // THEN
    assert!(ids.iter().all(|&id| id != NOT_SUBMITTED));
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "{ids:?}");
    assert_eq!(drain_until(&mut manager, ids.len()).len(), ids.len());
}

/// **VALUE**: A full job queue rejects with 0 and never blocks.
///
/// **BUG THIS CATCHES**: Would catch a submit that blocks (hanging the test) or
/// reports an id for a job that was dropped.
#[test]
fn given_worker_busy_and_queue_full_when_submitting_then_returns_zero() {
    // GIVEN: Worker held inside the first job, queue of 3 filled behind it
    let (transport, entered, release) = gated_transport();
    let mut manager = start(transport, settings(3, 16));
    assert_ne!(manager.submit_get_transport(), NOT_SUBMITTED);
    entered.recv_timeout(WAIT).unwrap();
    for _ in 0..3 {
        assert_ne!(manager.submit_get_transport(), NOT_SUBMITTED);
    }

    // WHEN
    let rejected = manager.submit_get_transport();

    // THEN
    assert_eq!(rejected, NOT_SUBMITTED);
    assert_eq!(manager.queued_jobs(), 3);

    // THEN: Exactly the accepted jobs complete once released
    for _ in 0..4 {
        release.send(()).unwrap();
    }
    assert_eq!(drain_until(&mut manager, 4).len(), 4);
}

/// **VALUE**: Draining in pieces loses and duplicates nothing, and order is kept.
///
/// **BUG THIS CATCHES**: Would catch a drain that clears results it did not
/// return, or a worker that reorders jobs.
#[test]
fn given_jobs_drained_across_several_calls_when_collected_then_each_result_once_in_order() {
    // GIVEN
    let mut manager = start(FakeTransport::ok("TRANSPORT\t0\t0\t0\t1.1.00\n"), settings(10, 10));
    let submitted: Vec<u32> = (0..8).map(|_| manager.submit_get_transport()).collect();

    // WHEN: Partial drains until everything has arrived
    let results = drain_until(&mut manager, submitted.len());

    // THEN
    let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, submitted);
    assert!(manager.process_results().is_empty());
}

/// **VALUE**: A tiny result queue delays results instead of dropping them.
///
/// **BUG THIS CATCHES**: Would catch a worker that discards results when the
/// interactive side is slow to drain.
#[test]
fn given_result_queue_smaller_than_backlog_when_draining_slowly_then_nothing_lost() {
    let mut manager = start(FakeTransport::ok("TRANSPORT\t0\t0\t0\t1.1.00\n"), settings(10, 1));
    for _ in 0..5 {
        manager.submit_get_transport();
    }
    sleep(Duration::from_millis(100));

    assert_eq!(drain_until(&mut manager, 5).len(), 5);
}

/// **VALUE**: Results carry the submit time and the worker's completion time.
///
/// **BUG THIS CATCHES**: Would catch the worker stamping with the submit time,
/// which makes every latency zero.
#[test]
fn given_clock_advances_during_job_when_draining_then_latency_reported() {
    // GIVEN: A job held inside the transport while the clock moves on
    let (transport, entered, release) = gated_transport();
    let clock = Arc::new(FakeClock::at(1_000));
    let executor = JobExecutor {
        http: Box::new(transport),
        network: Box::new(FakeNetwork::up()),
        credentials: credentials(),
        base_url: BASE_URL.to_string(),
    };
    let mut manager = JobManager::start(executor, clock.clone(), settings(4, 4)).unwrap();
    let id = manager.submit_get_transport();
    entered.recv_timeout(WAIT).unwrap();

    // WHEN
    clock.set(1_250);
    release.send(()).unwrap();
    let results = drain_until(&mut manager, 1);

    // THEN
    assert_eq!(results[0].id, id);
    assert_eq!(results[0].kind, JobKind::GetTransport);
    assert!(results[0].success);
    assert_eq!(results[0].submitted_at_ms, 1_000);
    assert_eq!(results[0].timestamp_ms, 1_250);
    assert_eq!(results[0].latency_ms(), 250);
}

/// **VALUE**: A submit into a stopped manager is refused with a logged reason.
#[test]
fn given_not_running_error_when_formatted_then_names_the_job() {
    let err = crate::error::manager::ManagerError::NotRunning {
        message: "Cannot submit GetTransport job".to_string(),
        location: common::ErrorLocation::from(std::panic::Location::caller()),
    };

    let text = err.to_string();
    assert!(text.starts_with("Worker Not Running Error:"));
    assert!(text.contains("GetTransport"));
}

/// **VALUE**: Jobs capture the script action id at submission time.
///
/// **WHY THIS MATTERS**: The worker must not share the interactive side's
/// copy; a later update must not rewrite already queued jobs.
#[test]
fn given_script_id_changed_after_submit_when_job_runs_then_old_id_used() {
    // GIVEN
    let transport = FakeTransport::ok("");
    let requests: Arc<Mutex<Vec<String>>> = transport.requests();
    let mut manager = start(transport, settings(4, 4));
    manager.set_script_action_id("_RS_OLD");

    // WHEN
    manager.submit_get_status();
    manager.set_script_action_id("_RS_NEW");
    drain_until(&mut manager, 1);

    // THEN
    let urls = requests.lock().unwrap();
    assert!(urls[0].contains(";_RS_OLD;"), "{}", urls[0]);
}

#[test]
fn given_connection_flags_when_setting_then_ready_requires_both() {
    let mut manager = start(FakeTransport::ok(""), settings(2, 2));
    assert!(!manager.is_ready());

    manager.set_wifi_connected(true);
    assert!(manager.is_wifi_connected());
    assert!(!manager.is_ready());

    manager.set_script_action_id("_RS1");
    assert_eq!(manager.script_action_id(), "_RS1");
    assert!(manager.is_ready());
}

/// **VALUE**: Shutdown joins the worker and later submits are refused.
///
/// **BUG THIS CATCHES**: Would catch a shutdown that leaves the thread
/// running, or a submit that queues into a dead worker and returns an id.
#[test]
fn given_shutdown_when_submitting_then_zero_and_shutdown_idempotent() {
    let mut manager = start(FakeTransport::ok(""), settings(2, 2));
    assert!(manager.is_running());

    manager.shutdown();
    manager.shutdown();

    assert!(!manager.is_running());
    assert_eq!(manager.submit_get_transport(), NOT_SUBMITTED);
}
