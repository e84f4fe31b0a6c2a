use setlist_remote::session::{Session, run_until};

use remote_core::{ConnectionPhase, RemoteConfig};

use std::time::Duration;

use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_REPLY: &str = "EXTSTATE\tReaperSetlist\ttabs\t[{\"length\":200,\"name\":\"Opener.rpp\",\"index\":0},{\"length\":180,\"name\":\"Ballad.rpp\",\"index\":1}]\nEXTSTATE\tReaperSetlist\tactiveIndex\t0\nTRANSPORT\t0\t0.000000\t0\t1.1.00\n";

fn config_for(server: &MockServer) -> RemoteConfig {
    let address = server.address();
    let mut config = RemoteConfig::default();
    config.reaper.host = address.ip().to_string();
    config.reaper.port = address.port();
    config.wifi.connect_timeout_ms = 2_000;
    config.http.timeout_ms = 2_000;
    config.jobs.worker_poll_interval_ms = 10;
    config.supervisor.script_id_retry_interval_ms = 200;
    config
}

/// **VALUE**: The runner's loop goes from cold start to a displayed song
/// against a live HTTP server.
///
/// **WHY THIS MATTERS**: This is the whole product path: probe, script id,
/// first status poll, state update, clean shutdown.
///
/// **BUG THIS CATCHES**: Would catch the poller not starting once ready, the
/// state ignoring status results, or shutdown hanging on the worker.
#[tokio::test(flavor = "multi_thread")]
async fn given_daw_with_setlist_when_running_loop_then_active_song_known() {
    // GIVEN: A DAW with the script installed and one open setlist
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_/GET/EXTSTATE/ReaperSetlist/ScriptActionId"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("EXTSTATE\tReaperSetlist\tScriptActionId\t_RS42\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/_/SET/EXTSTATE/ReaperSetlist/Operation/getOpenTabs;_RS42;.*TRANSPORT$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_REPLY))
        .mount(&server)
        .await;
    let config = config_for(&server);

    // WHEN: Running the loop for a few seconds
    let mut session = tokio::task::spawn_blocking(move || Session::start(&config))
        .await
        .unwrap()
        .unwrap();
    run_until(
        &mut session,
        Duration::from_millis(16),
        tokio::time::sleep(Duration::from_secs(3)),
    )
    .await;

    // THEN: Ready, with the opener shown
    assert_eq!(session.supervisor().phase(), ConnectionPhase::Ready);
    assert!(session.manager().is_ready());
    assert_eq!(
        session.state().active_song().map(|t| t.name.as_str()),
        Some("Opener")
    );
    assert!(!session.state().is_playing());

    tokio::task::spawn_blocking(move || session.shutdown())
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn given_invalid_host_when_starting_session_then_config_error() {
    let mut config = RemoteConfig::default();
    config.reaper.host = "http://studio.local".to_string();

    let result = tokio::task::spawn_blocking(move || Session::start(&config).map(|_| ()))
        .await
        .unwrap();

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Config Error:"));
}
