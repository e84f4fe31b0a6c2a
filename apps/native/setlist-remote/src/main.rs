use setlist_remote::error::RemoteError;
use setlist_remote::logger::{initialize as LoggerInitialize, level_from_config};
use setlist_remote::session::{Session, run_until_ctrl_c};

use remote_core::RemoteConfig;
use remote_core::config::{apply_env_overrides, resolve_config_dir, try_load_dotenv};

use std::fs::create_dir_all;
use std::process::ExitCode;

use log::{error, info};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), RemoteError> {
    let dotenv = try_load_dotenv();

    let config_dir = resolve_config_dir()?;
    create_dir_all(&config_dir.path)?;

    let mut config = RemoteConfig::load(&config_dir.path)?;
    let overrides = apply_env_overrides(&mut config)?;

    // Logger FIRST after config, so the level override applies
    LoggerInitialize(
        &config_dir.path,
        level_from_config(config.app.log_level.as_deref()),
    )?;

    info!("Setlist remote starting");
    info!(
        "Config directory: {} ({})",
        config_dir.path.display(),
        config_dir.source
    );
    if let Some(path) = dotenv.path.filter(|_| dotenv.loaded) {
        info!("Loaded environment from {}", path.display());
    }
    if !overrides.is_empty() {
        info!("Environment overrides: {}", overrides.join(", "));
    }

    // The blocking HTTP client must exist before the runtime starts and be
    // dropped after it ends.
    let mut session = Session::start(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_until_ctrl_c(&mut session, config.tick_interval()));
    drop(runtime);

    session.shutdown();
    info!("Setlist remote stopped");
    result
}
