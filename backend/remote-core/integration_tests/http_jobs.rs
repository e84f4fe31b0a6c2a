use crate::support::{start_manager, wait_for};

use models::PlayState;
use remote_core::{JobKind, NOT_SUBMITTED, PlayAction, TabDirection};

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BATCH_REPLY: &str = "EXTSTATE\tReaperSetlist\ttabs\t[{\"length\":181.5,\"name\":\"Opener.rpp\",\"index\":0},{\"length\":240,\"name\":\"Ballad.rpp\",\"index\":1}]\nEXTSTATE\tReaperSetlist\tactiveIndex\t1\nTRANSPORT\t1\t12.5\t0\t5.1.00\n";

/// **VALUE**: A tab change goes out as one batched GET on the control-surface
/// path and the reply is decoded into setlist and transport state.
///
/// **WHY THIS MATTERS**: The DAW only understands the exact `/_/<cmd>;<cmd>`
/// form. A reordered batch shifts every reply line.
///
/// **BUG THIS CATCHES**: Would catch URL encoding of the separators, a wrong
/// command order, or the script action id not being copied into the job.
#[tokio::test(flavor = "multi_thread")]
async fn given_daw_answers_batch_when_changing_tab_then_state_decoded_over_http() {
    // GIVEN: A DAW answering the exact batch path
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/_/40861;SET/EXTSTATE/ReaperSetlist/Operation/getOpenTabs;12345;GET/EXTSTATE/ReaperSetlist/tabs;GET/EXTSTATE/ReaperSetlist/activeIndex;TRANSPORT",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(BATCH_REPLY))
        .expect(1)
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN: Submitting a tab change with a known script id
    let result = tokio::task::spawn_blocking(move || {
        let mut manager = start_manager(&address, Duration::from_secs(5));
        manager.set_script_action_id("12345");
        let id = manager.submit_change_tab(TabDirection::Next);
        assert_ne!(id, NOT_SUBMITTED);
        let result = wait_for(&mut manager, id);
        manager.shutdown();
        result
    })
    .await
    .unwrap();

    // THEN: Decoded state matches the reply
    assert!(result.success);
    assert_eq!(result.kind, JobKind::ChangeTab);
    let state = result.reaper_state().unwrap();
    assert!(state.success);
    assert_eq!(state.active_tab().map(|t| t.name.as_str()), Some("Ballad"));
    let transport = result.transport().unwrap();
    assert_eq!(transport.play_state, PlayState::Playing);
    assert_eq!(transport.position_bars_beats, "5.1.00");
}

#[tokio::test(flavor = "multi_thread")]
async fn given_script_installed_when_fetching_script_id_then_id_returned() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_/GET/EXTSTATE/ReaperSetlist/ScriptActionId"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("EXTSTATE\tReaperSetlist\tScriptActionId\t_RSabc123\n"),
        )
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN
    let result = tokio::task::spawn_blocking(move || {
        let mut manager = start_manager(&address, Duration::from_secs(5));
        let id = manager.submit_get_script_action_id();
        wait_for(&mut manager, id)
    })
    .await
    .unwrap();

    // THEN
    assert!(result.success);
    assert_eq!(result.script_action_id(), Some("_RSabc123"));
}

/// **VALUE**: A non-2xx status is a failed job, not a parse of the error page.
///
/// **BUG THIS CATCHES**: Would catch treating any response body as valid
/// transport data.
#[tokio::test(flavor = "multi_thread")]
async fn given_server_error_when_playing_then_job_fails() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("TRANSPORT\t1\t0\t0\t1.1.00\n"))
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN
    let result = tokio::task::spawn_blocking(move || {
        let mut manager = start_manager(&address, Duration::from_secs(5));
        let id = manager.submit_change_playstate(PlayAction::Play);
        wait_for(&mut manager, id)
    })
    .await
    .unwrap();

    // THEN
    assert!(!result.success);
    assert_eq!(result.kind, JobKind::ChangePlaystate);
    assert!(!result.transport().is_some_and(|t| t.success));
}

/// **VALUE**: A DAW that stalls past the request timeout yields a failed result
/// and the worker stays usable.
///
/// **WHY THIS MATTERS**: The request timeout is the only bound on how long one
/// job can hold the worker.
///
/// **BUG THIS CATCHES**: Would catch a missing client timeout (job hangs) or a
/// worker that dies on a timeout error.
#[tokio::test(flavor = "multi_thread")]
async fn given_slow_daw_when_request_times_out_then_failure_and_worker_keeps_running() {
    // GIVEN: Replies arrive well after the 300 ms timeout
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_/TRANSPORT"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("TRANSPORT\t0\t0\t0\t1.1.00\n")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let address = *server.address();

    // WHEN
    let (result, still_running) = tokio::task::spawn_blocking(move || {
        let mut manager = start_manager(&address, Duration::from_millis(300));
        let id = manager.submit_get_transport();
        let result = wait_for(&mut manager, id);
        (result, manager.is_running())
    })
    .await
    .unwrap();

    // THEN
    assert!(!result.success);
    assert_eq!(result.kind, JobKind::GetTransport);
    assert!(still_running);
}
