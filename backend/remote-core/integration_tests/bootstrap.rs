use crate::support::{WAIT, start_manager};

use remote_core::{Clock, ConnectionPhase, ConnectionSupervisor, SupervisorSettings, SystemClock};

use std::thread::sleep;
use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: The full bring-up against a live socket: connect, fetch the
/// script action id, reach Ready, and hand both facts to the manager.
///
/// **WHY THIS MATTERS**: Nothing else in the app works until this sequence
/// completes, and it spans every layer (supervisor, manager, worker, network
/// probe, HTTP, codec).
///
/// **BUG THIS CATCHES**: Would catch the supervisor and manager disagreeing on
/// readiness, or the script id never reaching setlist jobs.
#[tokio::test(flavor = "multi_thread")]
async fn given_reachable_daw_when_supervising_then_reaches_ready() {
    // GIVEN: A DAW with the setlist script installed
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_/GET/EXTSTATE/ReaperSetlist/ScriptActionId"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("EXTSTATE\tReaperSetlist\tScriptActionId\t_RS77\n"),
        )
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN: Ticking the supervisor until it settles
    let (phase, manager_ready, manager_script_id, attempts) =
        tokio::task::spawn_blocking(move || {
            let mut manager = start_manager(&address, Duration::from_secs(5));
            let clock = SystemClock::new();
            let mut supervisor = ConnectionSupervisor::new(SupervisorSettings {
                wifi_retry_interval_ms: 500,
                script_id_retry_interval_ms: 200,
                max_script_id_attempts: 5,
            });

            let deadline = Instant::now() + WAIT;
            while !supervisor.is_ready() && Instant::now() < deadline {
                supervisor.tick(clock.now_ms(), &mut manager);
                for result in manager.process_results() {
                    supervisor.handle_result(&result, &mut manager);
                }
                sleep(Duration::from_millis(10));
            }

            (
                supervisor.phase(),
                manager.is_ready(),
                manager.script_action_id().to_string(),
                supervisor.script_id_attempts(),
            )
        })
        .await
        .unwrap();

    // THEN
    assert_eq!(phase, ConnectionPhase::Ready);
    assert!(manager_ready);
    assert_eq!(manager_script_id, "_RS77");
    assert_eq!(attempts, 0);
}

/// **VALUE**: Without the DAW-side script, the supervisor stops after the
/// configured number of attempts instead of polling forever.
///
/// **BUG THIS CATCHES**: Would catch the attempt counter resetting on failure.
#[tokio::test(flavor = "multi_thread")]
async fn given_script_missing_when_supervising_then_gives_up_after_max_attempts() {
    // GIVEN: Empty EXTSTATE value
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_/GET/EXTSTATE/ReaperSetlist/ScriptActionId"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("EXTSTATE\tReaperSetlist\tScriptActionId\t\n"),
        )
        .expect(3)
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN
    let (exhausted, wifi_connected, ready) = tokio::task::spawn_blocking(move || {
        let mut manager = start_manager(&address, Duration::from_secs(5));
        let clock = SystemClock::new();
        let mut supervisor = ConnectionSupervisor::new(SupervisorSettings {
            wifi_retry_interval_ms: 500,
            script_id_retry_interval_ms: 50,
            max_script_id_attempts: 3,
        });

        let deadline = Instant::now() + WAIT;
        while !supervisor.is_exhausted() && Instant::now() < deadline {
            supervisor.tick(clock.now_ms(), &mut manager);
            for result in manager.process_results() {
                supervisor.handle_result(&result, &mut manager);
            }
            sleep(Duration::from_millis(10));
        }

        (
            supervisor.is_exhausted(),
            manager.is_wifi_connected(),
            manager.is_ready(),
        )
    })
    .await
    .unwrap();

    // THEN: Connected but never ready; the mock verifies exactly 3 requests on drop
    assert!(exhausted);
    assert!(wifi_connected);
    assert!(!ready);
}
