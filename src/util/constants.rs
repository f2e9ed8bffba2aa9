// Sidelog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name (window title).
pub const APP_NAME: &str = "Log Viewer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Sidelog";

/// Current crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the optional configuration file in the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Entry retention
// =============================================================================

/// Default maximum number of entries retained in the viewer buffer.
///
/// The buffer is a ring: once full, the oldest entry is evicted for each new
/// one and the status bar reports the dropped count. Hosts that log at high
/// frequency for long sessions are bounded by this rather than growing
/// without limit.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Minimum user-configurable entry cap.
pub const MIN_MAX_ENTRIES: usize = 100;

/// Hard upper bound on the entry cap (prevents configuration mistakes).
pub const ABSOLUTE_MAX_ENTRIES: usize = 1_000_000;

// =============================================================================
// Window layout
// =============================================================================

/// Default viewer window size.
pub const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// Minimum viewer window size.
pub const MIN_WINDOW_WIDTH: f32 = 400.0;
pub const MIN_WINDOW_HEIGHT: f32 = 200.0;

/// Largest accepted configured window dimension.
pub const MAX_WINDOW_DIMENSION: f32 = 8192.0;

/// Fixed width of the Time column.
pub const TIME_COLUMN_WIDTH: f32 = 100.0;

/// Fixed width of the Level column. The Message column takes whatever
/// width remains after Time and Level.
pub const LEVEL_COLUMN_WIDTH: f32 = 80.0;

// =============================================================================
// Parent-death watcher
// =============================================================================

/// Interval between parent-PID liveness polls.
pub const PARENT_POLL_INTERVAL_MS: u64 = 1_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, the debug flag, nor the config
/// file specifies one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
