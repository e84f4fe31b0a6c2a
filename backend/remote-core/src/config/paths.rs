//! Where the config file lives.
//!
//! Lookup order:
//! 1. `SETLIST_REMOTE_CONFIG_DIR` environment variable
//! 2. Platform config directory via `dirs` (`~/.config/setlist-remote` on Linux)

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use log::info;

pub const CONFIG_DIR_ENV: &str = "SETLIST_REMOTE_CONFIG_DIR";
pub const APP_DIR_NAME: &str = "setlist-remote";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigDirSource {
    EnvVar,
    PlatformDefault,
}

impl fmt::Display for ConfigDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigDirSource::EnvVar => write!(f, "{CONFIG_DIR_ENV}"),
            ConfigDirSource::PlatformDefault => write!(f, "platform default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    pub path: PathBuf,
    pub source: ConfigDirSource,
}

/// # Errors
/// Returns `ConfigError::DirectoryNotFound` when no override is set and the
/// platform has no config directory.
#[track_caller]
pub fn resolve_config_dir() -> Result<ConfigDir, ConfigError> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV)
        && !custom_dir.trim().is_empty()
    {
        let path = PathBuf::from(custom_dir);
        info!("Using {CONFIG_DIR_ENV} override: {path:?}");
        return Ok(ConfigDir {
            path,
            source: ConfigDirSource::EnvVar,
        });
    }

    dirs::config_dir()
        .map(|dir| ConfigDir {
            path: dir.join(APP_DIR_NAME),
            source: ConfigDirSource::PlatformDefault,
        })
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })
}
