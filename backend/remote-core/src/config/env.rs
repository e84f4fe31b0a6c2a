//! `.env` loading and environment overrides.
//!
//! The override names match the build-time settings of the handheld build,
//! so one `.env` serves both.

use crate::config::RemoteConfig;
use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const ENV_WIFI_SSID: &str = "WIFI_SSID";
pub const ENV_WIFI_PASSWORD: &str = "WIFI_PASSWORD";
pub const ENV_REAPER_SERVER: &str = "REAPER_SERVER";
pub const ENV_REAPER_PORT: &str = "REAPER_PORT";

/// Result of attempting to load a .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to the .env file that was loaded, if any.
    pub path: Option<PathBuf>,
    /// Whether any .env file was loaded.
    pub loaded: bool,
}

/// Attempts to load .env from the current directory, then the executable directory.
pub fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {path:?}");
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    if let Ok(exe_path) = env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(()) => {
                    info!("Loaded .env from: {env_path:?}");
                    return EnvLoadResult {
                        path: Some(env_path),
                        loaded: true,
                    };
                }
                Err(e) => warn!("Failed to parse .env at {env_path:?}: {e}"),
            }
        }
    }

    debug!("No .env file found");
    EnvLoadResult {
        path: None,
        loaded: false,
    }
}

/// Apply overrides from the process environment. Returns the names that were applied.
#[track_caller]
pub fn apply_env_overrides(config: &mut RemoteConfig) -> Result<Vec<&'static str>, ConfigError> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides using `lookup` in place of the process environment.
///
/// Empty values are ignored. The result is re-validated.
#[track_caller]
pub fn apply_overrides_from<F>(
    config: &mut RemoteConfig,
    lookup: F,
) -> Result<Vec<&'static str>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let mut applied = Vec::new();

    if let Some(ssid) = get(ENV_WIFI_SSID) {
        config.wifi.ssid = ssid;
        applied.push(ENV_WIFI_SSID);
    }

    if let Some(password) = get(ENV_WIFI_PASSWORD) {
        config.wifi.password = RedactedSecret::new(password);
        applied.push(ENV_WIFI_PASSWORD);
    }

    if let Some(host) = get(ENV_REAPER_SERVER) {
        config.reaper.host = host.trim().to_string();
        applied.push(ENV_REAPER_SERVER);
    }

    if let Some(port) = get(ENV_REAPER_PORT) {
        config.reaper.port =
            port.trim()
                .parse()
                .map_err(|e| ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Invalid {ENV_REAPER_PORT} '{port}': {e}"),
                })?;
        applied.push(ENV_REAPER_PORT);
    }

    if !applied.is_empty() {
        info!("Applied environment overrides: {}", applied.join(", "));
    }

    config.validate()?;
    Ok(applied)
}
