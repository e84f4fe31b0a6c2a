use crate::logger::{DEFAULT_LOG_LEVEL, LOG_FILE_NAME, initialize, level_from_config};

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that logger initialization is idempotent.
///
/// **WHY THIS MATTERS**: Tests and the binary may both initialize; a second
/// global logger install would otherwise fail and abort startup.
///
/// **BUG THIS CATCHES**: Would catch removing the `Once` + `AtomicBool` guard.
#[test]
fn given_logger_initialized_when_called_twice_then_both_succeed() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let first = initialize(dir.path(), LevelFilter::Debug);
    let second = initialize(dir.path(), LevelFilter::Debug);

    // THEN
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should succeed (idempotent)");
    assert!(dir.path().join(LOG_FILE_NAME).exists());
}

#[test]
fn given_config_level_when_resolving_then_named_level_or_build_default() {
    assert_eq!(level_from_config(Some("warn")), LevelFilter::Warn);
    assert_eq!(level_from_config(Some("TRACE")), LevelFilter::Trace);
    assert_eq!(level_from_config(None), DEFAULT_LOG_LEVEL);
}
