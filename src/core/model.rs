// Sidelog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
//
// The host hands the viewer three opaque text fields per entry: time, level,
// message. All three are displayed verbatim (pass-through contract); the
// derived `Severity` exists only so the widget can colour rows, and never
// alters the stored level text.

use serde::Serialize;

// =============================================================================
// Log Entry
// =============================================================================

/// A single viewer entry. Immutable once created; ordering is append order.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Monotonically increasing sequence number within one window lifetime.
    /// Restarts from 0 after terminate/re-initialise.
    pub seq: u64,

    /// Caller-supplied timestamp text, displayed verbatim.
    pub time: String,

    /// Caller-supplied level text, displayed verbatim.
    pub level: String,

    /// Caller-supplied message text.
    pub message: String,

    /// Severity derived from `level` for display colouring only.
    #[serde(skip)]
    pub severity: Severity,
}

impl LogEntry {
    /// Build an entry, deriving the display severity from the level text.
    pub fn new(seq: u64, time: String, level: String, message: String) -> Self {
        let severity = Severity::from_level(&level);
        Self {
            seq,
            time,
            level,
            message,
            severity,
        }
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Normalised severity levels, ordered from most to least severe.
///
/// Host level strings are free-form; common spellings (Error, ERR, E, error,
/// Fatal, etc.) are mapped case-insensitively. Anything unrecognised is
/// `Unknown` and renders in a neutral colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    #[default]
    Unknown,
}

impl Severity {
    /// Map a raw level string onto a severity. Case-insensitive; matching is
    /// exact against the known spellings, not substring-based, so a level
    /// like "AUDIT" stays Unknown rather than being misclassified.
    pub fn from_level(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" | "crit" | "fatal" | "panic" => Severity::Critical,
            "error" | "err" | "e" | "failed" | "failure" => Severity::Error,
            "warning" | "warn" | "w" => Severity::Warning,
            "info" | "information" | "i" | "notice" => Severity::Info,
            "debug" | "dbg" | "d" | "trace" | "verbose" => Severity::Debug,
            _ => Severity::Unknown,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
            Severity::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
