// Sidelog - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - Preview binary flag: --debug (sets the debug level directly)
//   - Config file: [logging] level = "debug"
//
// Output: stderr. Sidelog is itself a log *viewer*, so its own diagnostics
// deliberately stay off the widget and out of the host's way.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Initialise the logging subsystem. Idempotent: the C surface may reach
/// this through both `initCXXNativeUtils` and `initLogViewer`, and only the
/// first call installs the subscriber.
///
/// `debug_flag` is true when the caller requested debug output explicitly.
/// `config_level` is the level from config.toml (if present).
///
/// Priority: RUST_LOG env var > debug flag > config level > default "info".
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    INIT.get_or_init(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if debug_flag {
            EnvFilter::new("debug")
        } else if let Some(level) = config_level {
            EnvFilter::new(level)
        } else {
            EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .compact()
            .init();

        tracing::debug!(
            app = super::constants::APP_ID,
            version = super::constants::APP_VERSION,
            "Logging initialised"
        );
    });
}
