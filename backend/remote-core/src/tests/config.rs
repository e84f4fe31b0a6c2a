use crate::config::env::{
    ENV_REAPER_PORT, ENV_REAPER_SERVER, ENV_WIFI_PASSWORD, ENV_WIFI_SSID, apply_env_overrides,
    apply_overrides_from,
};
use crate::config::paths::{CONFIG_DIR_ENV, ConfigDirSource, resolve_config_dir};
use crate::config::{CONFIG_FILE_NAME, RemoteConfig};
use crate::error::config::ConfigError;

use std::collections::HashMap;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// **VALUE**: Defaults match the handheld's documented settings.
///
/// **BUG THIS CATCHES**: Would catch a default drifting (e.g. port 80) so that
/// a fresh install talks to the wrong place.
#[test]
fn given_no_config_when_using_defaults_then_documented_values_apply() {
    // GIVEN / WHEN
    let config = RemoteConfig::default();

    // THEN
    assert_eq!(config.wifi.ssid, "YourWiFiNetwork");
    assert_eq!(config.wifi.password.expose(), "YourWiFiPassword");
    assert_eq!(config.wifi_connect_timeout(), Duration::from_secs(20));
    assert_eq!(config.wifi.connect_attempts, 3);
    assert_eq!(config.reaper.host, "192.168.1.100");
    assert_eq!(config.reaper.port, 8080);
    assert_eq!(config.http_connect_timeout(), Duration::from_secs(5));
    assert_eq!(config.http_timeout(), Duration::from_secs(10));
    assert_eq!(config.jobs.job_queue_capacity, 10);
    assert_eq!(config.jobs.result_queue_capacity, 10);
    assert_eq!(config.supervisor.wifi_retry_interval_ms, 10_000);
    assert_eq!(config.supervisor.script_id_retry_interval_ms, 5_000);
    assert_eq!(config.supervisor.max_script_id_attempts, 5);
    assert_eq!(config.app.tick_hz, 60);
    assert!(config.validate().is_ok());
    assert_eq!(
        config.endpoint().unwrap().base_url(),
        "http://192.168.1.100:8080/_"
    );
}

#[test]
fn given_missing_file_when_loading_then_defaults_returned() {
    let dir = TempDir::new().unwrap();

    let config = RemoteConfig::load(dir.path()).unwrap();

    assert_eq!(config.reaper.port, 8080);
}

#[test]
fn given_partial_file_when_loading_then_missing_fields_defaulted() {
    // GIVEN: Only the DAW host is set
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[reaper]\nhost = \"studio.local\"\n\n[app]\ntick_hz = 30\n",
    )
    .unwrap();

    // WHEN
    let config = RemoteConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config.reaper.host, "studio.local");
    assert_eq!(config.reaper.port, 8080);
    assert_eq!(config.app.tick_hz, 30);
    assert_eq!(config.tick_interval(), Duration::from_secs(1) / 30);
}

/// **VALUE**: Saving never writes the WiFi password to disk.
///
/// **WHY THIS MATTERS**: The config file is plain text in the user's home
/// directory.
///
/// **BUG THIS CATCHES**: Would catch removing `skip_serializing` on the
/// password field.
#[test]
fn given_config_with_password_when_saving_and_loading_then_password_not_persisted() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let mut config = RemoteConfig::default();
    config.wifi.ssid = "StageNet".to_string();
    config.wifi.password = common::RedactedSecret::new("s3cret-pass");
    config.reaper.port = 9090;

    // WHEN
    config.save(dir.path()).unwrap();
    let contents = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
    let loaded = RemoteConfig::load(dir.path()).unwrap();

    // THEN
    assert!(!contents.contains("s3cret-pass"));
    assert!(!dir.path().join(format!("{CONFIG_FILE_NAME}.tmp")).exists());
    assert_eq!(loaded.wifi.ssid, "StageNet");
    assert_eq!(loaded.reaper.port, 9090);
    assert_eq!(loaded.wifi.password.expose(), "YourWiFiPassword");
}

#[test]
fn given_corrupt_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[reaper\nport = ").unwrap();

    let result = RemoteConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_invalid_values_when_validating_then_validation_error() {
    let mut cases: Vec<RemoteConfig> = Vec::new();

    let mut c = RemoteConfig::default();
    c.jobs.job_queue_capacity = 0;
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.supervisor.max_script_id_attempts = 0;
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.app.tick_hz = 0;
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.app.tick_hz = 5_000;
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.reaper.host = "  ".to_string();
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.http.timeout_ms = 0;
    cases.push(c);

    let mut c = RemoteConfig::default();
    c.app.log_level = Some("loud".to_string());
    cases.push(c);

    for config in cases {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "{config:?}"
        );
    }
}

#[test]
fn given_invalid_file_values_when_loading_then_validation_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[jobs]\njob_queue_capacity = 0\n").unwrap();

    let result = RemoteConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_host_with_scheme_when_building_endpoint_then_validation_error() {
    let mut config = RemoteConfig::default();
    config.reaper.host = "http://studio.local".to_string();

    assert!(matches!(
        config.endpoint(),
        Err(ConfigError::ValidationError { .. })
    ));
}

// ----------------------------------------------------------------------------
// Environment overrides
// ----------------------------------------------------------------------------

/// **VALUE**: The handheld's override names apply to the host runner.
///
/// **BUG THIS CATCHES**: Would catch a renamed variable that silently stops
/// overriding the DAW address.
#[test]
fn given_all_overrides_when_applying_then_config_updated() {
    // GIVEN
    let mut config = RemoteConfig::default();
    let env = lookup(&[
        (ENV_WIFI_SSID, "Venue"),
        (ENV_WIFI_PASSWORD, "pw-venue"),
        (ENV_REAPER_SERVER, " 10.0.0.7 "),
        (ENV_REAPER_PORT, "8181"),
    ]);

    // WHEN
    let applied = apply_overrides_from(&mut config, env).unwrap();

    // THEN
    assert_eq!(applied.len(), 4);
    assert_eq!(config.wifi.ssid, "Venue");
    assert_eq!(config.wifi.password.expose(), "pw-venue");
    assert_eq!(config.reaper.host, "10.0.0.7");
    assert_eq!(config.reaper.port, 8181);
}

#[test]
fn given_empty_override_values_when_applying_then_ignored() {
    let mut config = RemoteConfig::default();

    let applied =
        apply_overrides_from(&mut config, lookup(&[(ENV_REAPER_SERVER, ""), (ENV_WIFI_SSID, "  ")]))
            .unwrap();

    assert!(applied.is_empty());
    assert_eq!(config.reaper.host, "192.168.1.100");
}

#[test]
fn given_non_numeric_port_override_when_applying_then_validation_error() {
    let mut config = RemoteConfig::default();

    let result = apply_overrides_from(&mut config, lookup(&[(ENV_REAPER_PORT, "eighty")]));

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_zero_port_override_when_applying_then_validation_error() {
    let mut config = RemoteConfig::default();

    let result = apply_overrides_from(&mut config, lookup(&[(ENV_REAPER_PORT, "0")]));

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
#[serial]
fn given_process_env_override_when_applying_then_read_from_environment() {
    // GIVEN
    // SAFETY: serialised with the other environment tests.
    unsafe {
        std::env::set_var(ENV_REAPER_PORT, "8765");
    }
    let mut config = RemoteConfig::default();

    // WHEN
    let result = apply_env_overrides(&mut config);

    // THEN
    unsafe {
        std::env::remove_var(ENV_REAPER_PORT);
    }
    assert!(result.unwrap().contains(&ENV_REAPER_PORT));
    assert_eq!(config.reaper.port, 8765);
}

#[test]
#[serial]
fn given_config_dir_env_when_resolving_then_override_used() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    // SAFETY: serialised with the other environment tests.
    unsafe {
        std::env::set_var(CONFIG_DIR_ENV, dir.path());
    }

    // WHEN
    let resolved = resolve_config_dir();

    // THEN
    unsafe {
        std::env::remove_var(CONFIG_DIR_ENV);
    }
    let resolved = resolved.unwrap();
    assert_eq!(resolved.path, dir.path());
    assert_eq!(resolved.source, ConfigDirSource::EnvVar);
}
