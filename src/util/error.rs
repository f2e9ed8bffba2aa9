// Sidelog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// The C surface never sees these types: ffi.rs maps them onto its
// silent-no-op contract. Rust callers get the full taxonomy.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for Sidelog library operations.
/// Errors are categorised by the subsystem that produced them.
///
/// Configuration problems are deliberately absent: config.toml issues
/// degrade to warnings and defaults (see platform::config) rather than
/// failing the host's init call.
#[derive(Debug)]
pub enum SidelogError {
    /// A lifecycle operation was attempted in the wrong state.
    Lifecycle(LifecycleError),

    /// Entry export failed.
    Export(ExportError),
}

impl fmt::Display for SidelogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lifecycle(e) => write!(f, "Lifecycle error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for SidelogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lifecycle(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

impl From<LifecycleError> for SidelogError {
    fn from(e: LifecycleError) -> Self {
        Self::Lifecycle(e)
    }
}

impl From<ExportError> for SidelogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Lifecycle errors
// ---------------------------------------------------------------------------

/// Errors from the viewer lifecycle state machine.
///
/// The C surface discards these silently; they are explicit here so Rust
/// callers and tests can observe them.
#[derive(Debug, PartialEq, Eq)]
pub enum LifecycleError {
    /// An operation that requires an open viewer was called while
    /// uninitialised (append/show/terminate before initialise, or after a
    /// previous terminate).
    NotInitialised { operation: &'static str },

    /// `initialize` was called while a viewer is already open. The caller
    /// must terminate first (the C surface does this automatically).
    AlreadyOpen,

    /// The window backend could not be launched.
    BackendLaunch { reason: String },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialised { operation } => {
                write!(f, "'{operation}' called while the viewer is not initialised")
            }
            Self::AlreadyOpen => write!(f, "viewer is already open; terminate it first"),
            Self::BackendLaunch { reason } => {
                write!(f, "window backend failed to launch: {reason}")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors from CSV/JSON entry export.
#[derive(Debug)]
pub enum ExportError {
    /// CSV serialisation failed.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Underlying write failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "CSV export to '{}' failed: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export to '{}' failed: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "write to '{}' failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

