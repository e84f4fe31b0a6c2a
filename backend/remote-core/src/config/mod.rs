pub mod env;
pub mod paths;

pub use env::{EnvLoadResult, apply_env_overrides, try_load_dotenv};
pub use paths::{ConfigDir, ConfigDirSource, resolve_config_dir};

use crate::error::config::ConfigError;
use crate::manager::{
    DEFAULT_JOB_QUEUE_CAPACITY, DEFAULT_RESULT_QUEUE_CAPACITY, JobQueueSettings,
};
use crate::network::WifiCredentials;
use crate::supervisor::{
    DEFAULT_MAX_SCRIPT_ID_ATTEMPTS, DEFAULT_SCRIPT_ID_RETRY_INTERVAL_MS,
    DEFAULT_WIFI_RETRY_INTERVAL_MS, SupervisorSettings,
};

use common::{ErrorLocation, RedactedSecret};
use models::{ReaperEndpoint, ReaperEndpointBuilder};

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "setlist-remote.toml";

const MAX_TICK_HZ: u32 = 1000;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiConfig {
    #[serde(default = "default_wifi_ssid")]
    pub ssid: String,
    /// Never written back to disk.
    #[serde(default = "default_wifi_password", skip_serializing)]
    pub password: RedactedSecret,
    #[serde(default = "default_wifi_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_wifi_connect_attempts")]
    pub connect_attempts: u32,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: default_wifi_ssid(),
            password: default_wifi_password(),
            connect_timeout_ms: default_wifi_connect_timeout_ms(),
            connect_attempts: default_wifi_connect_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaperConfig {
    #[serde(default = "default_reaper_host")]
    pub host: String,
    #[serde(default = "default_reaper_port")]
    pub port: u16,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            host: default_reaper_host(),
            port: default_reaper_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_http_connect_timeout_ms(),
            timeout_ms: default_http_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_job_queue_capacity")]
    pub job_queue_capacity: usize,
    #[serde(default = "default_result_queue_capacity")]
    pub result_queue_capacity: usize,
    #[serde(default = "default_worker_poll_interval_ms")]
    pub worker_poll_interval_ms: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            job_queue_capacity: default_job_queue_capacity(),
            result_queue_capacity: default_result_queue_capacity(),
            worker_poll_interval_ms: default_worker_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    #[serde(default = "default_wifi_retry_interval_ms")]
    pub wifi_retry_interval_ms: u32,
    #[serde(default = "default_script_id_retry_interval_ms")]
    pub script_id_retry_interval_ms: u32,
    #[serde(default = "default_max_script_id_attempts")]
    pub max_script_id_attempts: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            wifi_retry_interval_ms: default_wifi_retry_interval_ms(),
            script_id_retry_interval_ms: default_script_id_retry_interval_ms(),
            max_script_id_attempts: default_max_script_id_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`. Unset means build default.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            log_level: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub wifi: WifiConfig,

    #[serde(default)]
    pub reaper: ReaperConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub jobs: JobsConfig,

    #[serde(default)]
    pub supervisor: SupervisorConfig,

    #[serde(default)]
    pub app: AppSection,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_wifi_ssid() -> String {
    "YourWiFiNetwork".to_string()
}
fn default_wifi_password() -> RedactedSecret {
    RedactedSecret::new("YourWiFiPassword")
}
fn default_wifi_connect_timeout_ms() -> u64 {
    20_000
}
fn default_wifi_connect_attempts() -> u32 {
    3
}
fn default_reaper_host() -> String {
    "192.168.1.100".to_string()
}
fn default_reaper_port() -> u16 {
    8080
}
fn default_http_connect_timeout_ms() -> u64 {
    5_000
}
fn default_http_timeout_ms() -> u64 {
    10_000
}
fn default_job_queue_capacity() -> usize {
    DEFAULT_JOB_QUEUE_CAPACITY
}
fn default_result_queue_capacity() -> usize {
    DEFAULT_RESULT_QUEUE_CAPACITY
}
fn default_worker_poll_interval_ms() -> u64 {
    100
}
fn default_wifi_retry_interval_ms() -> u32 {
    DEFAULT_WIFI_RETRY_INTERVAL_MS
}
fn default_script_id_retry_interval_ms() -> u32 {
    DEFAULT_SCRIPT_ID_RETRY_INTERVAL_MS
}
fn default_max_script_id_attempts() -> u32 {
    DEFAULT_MAX_SCRIPT_ID_ATTEMPTS
}
fn default_tick_hz() -> u32 {
    60
}

// ============================================
// IMPLEMENTATION
// ============================================

impl RemoteConfig {
    /// Load config from {config_dir}/setlist-remote.toml.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable, corrupted or invalid.
    #[track_caller]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: RemoteConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML: {e}");
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/setlist-remote.toml using temp file + rename.
    ///
    /// The WiFi password is not written; supply it through `WIFI_PASSWORD`.
    #[track_caller]
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, contents).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid value.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: String| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason,
        };

        if self.wifi.ssid.trim().is_empty() {
            return Err(fail("wifi.ssid cannot be empty".to_string()));
        }

        if self.wifi.connect_timeout_ms == 0 || self.wifi.connect_attempts == 0 {
            return Err(fail(format!(
                "wifi.connect_timeout_ms ({}) and wifi.connect_attempts ({}) must be > 0",
                self.wifi.connect_timeout_ms, self.wifi.connect_attempts
            )));
        }

        if self.reaper.host.trim().is_empty() {
            return Err(fail("reaper.host cannot be empty".to_string()));
        }

        if self.reaper.port == 0 {
            return Err(fail("reaper.port must be non-zero".to_string()));
        }

        if self.http.connect_timeout_ms == 0 || self.http.timeout_ms == 0 {
            return Err(fail(format!(
                "http timeouts must be > 0 (connect {}, total {})",
                self.http.connect_timeout_ms, self.http.timeout_ms
            )));
        }

        if self.jobs.job_queue_capacity == 0 || self.jobs.result_queue_capacity == 0 {
            return Err(fail(format!(
                "queue capacities must be >= 1 (jobs {}, results {})",
                self.jobs.job_queue_capacity, self.jobs.result_queue_capacity
            )));
        }

        if self.jobs.worker_poll_interval_ms == 0 {
            return Err(fail("jobs.worker_poll_interval_ms must be > 0".to_string()));
        }

        if self.supervisor.max_script_id_attempts == 0 {
            return Err(fail(
                "supervisor.max_script_id_attempts must be >= 1".to_string(),
            ));
        }

        if self.app.tick_hz == 0 || self.app.tick_hz > MAX_TICK_HZ {
            return Err(fail(format!(
                "Invalid tick rate: {} (must be 1-{MAX_TICK_HZ})",
                self.app.tick_hz
            )));
        }

        if let Some(level) = &self.app.log_level
            && level.parse::<log::LevelFilter>().is_err()
        {
            return Err(fail(format!("Invalid log level: {level}")));
        }

        Ok(())
    }

    /// Validated DAW endpoint.
    #[track_caller]
    pub fn endpoint(&self) -> Result<ReaperEndpoint, ConfigError> {
        ReaperEndpointBuilder::default()
            .with_host(self.reaper.host.clone())
            .with_port(self.reaper.port)
            .build()
            .map_err(|e| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })
    }

    pub fn credentials(&self) -> WifiCredentials {
        WifiCredentials::new(self.wifi.ssid.clone(), self.wifi.password.clone())
    }

    pub fn wifi_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.wifi.connect_timeout_ms)
    }

    pub fn http_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.http.connect_timeout_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http.timeout_ms)
    }

    pub fn queue_settings(&self) -> JobQueueSettings {
        JobQueueSettings {
            job_queue_capacity: self.jobs.job_queue_capacity,
            result_queue_capacity: self.jobs.result_queue_capacity,
            worker_poll_interval: Duration::from_millis(self.jobs.worker_poll_interval_ms),
        }
    }

    pub fn supervisor_settings(&self) -> SupervisorSettings {
        SupervisorSettings {
            wifi_retry_interval_ms: self.supervisor.wifi_retry_interval_ms,
            script_id_retry_interval_ms: self.supervisor.script_id_retry_interval_ms,
            max_script_id_attempts: self.supervisor.max_script_id_attempts,
        }
    }

    /// Interval between interactive loop ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.app.tick_hz.max(1)
    }
}
