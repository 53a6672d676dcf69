//! Log output for solver events.
//!
//! MipForge logs through `tracing`; nothing is printed unless a subscriber
//! is installed. [`init`] installs a formatting subscriber filtered by
//! `RUST_LOG`, defaulting to INFO for the solver crates.
//!
//! ## Log Levels
//!
//! - **INFO**: solve start/end, new incumbents when output is enabled
//! - **DEBUG**: applied parameters, contained callback failures after the first
//! - **TRACE**: individual callback dispatches

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global log subscriber.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}

/// Installs a subscriber writing through the test harness's capture.
///
/// Intended for tests; output appears only for failing tests or with
/// `--nocapture`.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
