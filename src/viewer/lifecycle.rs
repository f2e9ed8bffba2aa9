// Sidelog - viewer/lifecycle.rs
//
// Process-wide viewer lifecycle: Uninitialised -> Open -> Uninitialised.
//
// `initialize` is the only transition into Open and `terminate` the only one
// back. Operations outside the valid state return explicit errors rather
// than silently doing nothing; the C surface in ffi.rs maps those errors
// onto its silent-no-op contract.

use crate::core::model::LogEntry;
use crate::util::error::LifecycleError;
use crate::viewer::backend::{WindowBackend, WindowHandle};
use crate::viewer::window::{SharedState, ViewerOptions, WindowCommand};
use std::sync::{Arc, Mutex};

/// The two lifecycle states a viewer can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No window exists. append/show/terminate are invalid here.
    Uninitialised,

    /// A window exists (visible or not) and accepts entries.
    Open,
}

/// Everything owned while Open. Dropped wholesale on terminate, so a
/// re-initialised viewer starts with a fresh, empty buffer.
struct OpenViewer {
    shared: Arc<SharedState>,
    handle: Box<dyn WindowHandle>,
}

/// The viewer state machine. One instance exists process-wide for the C
/// surface (see [`global`]); Rust callers and tests may own their own.
pub struct Viewer {
    open: Option<OpenViewer>,
}

impl Viewer {
    /// A viewer in the Uninitialised state.
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        if self.open.is_some() {
            Lifecycle::Open
        } else {
            Lifecycle::Uninitialised
        }
    }

    /// Create the window and move to Open.
    ///
    /// Fails with `AlreadyOpen` if a window already exists -- the previous
    /// window is never silently replaced (and so never leaked).
    pub fn initialize(
        &mut self,
        backend: &dyn WindowBackend,
        options: ViewerOptions,
    ) -> Result<(), LifecycleError> {
        if self.open.is_some() {
            return Err(LifecycleError::AlreadyOpen);
        }

        let shared = Arc::new(SharedState::new(options.max_entries));
        let handle = backend.launch(Arc::clone(&shared), &options)?;
        self.open = Some(OpenViewer { shared, handle });

        tracing::info!(
            max_entries = options.max_entries,
            width = options.width,
            height = options.height,
            "Viewer initialised"
        );
        Ok(())
    }

    /// Create the window, tearing down any viewer already open first. The
    /// recreated viewer starts with an empty buffer and a fresh seq space.
    ///
    /// This is the teardown/recreate path `initLogViewer` takes so repeated
    /// host initialisation can never leak a window.
    pub fn reinitialize(
        &mut self,
        backend: &dyn WindowBackend,
        options: ViewerOptions,
    ) -> Result<(), LifecycleError> {
        if self.open.is_some() {
            tracing::warn!("initialise requested while open; recreating viewer");
            self.terminate()?;
        }
        self.initialize(backend, options)
    }

    /// Append an entry to the open viewer. Returns the entry's sequence
    /// number within this window lifetime.
    pub fn append(&self, time: &str, level: &str, message: &str) -> Result<u64, LifecycleError> {
        let open = self.require_open("append")?;
        Ok(open.shared.append(time, level, message))
    }

    /// Centre the window on screen, make it visible, and focus it.
    pub fn show(&self) -> Result<(), LifecycleError> {
        let open = self.require_open("show")?;
        open.shared.send(WindowCommand::Show);
        Ok(())
    }

    /// Destroy the window and return to Uninitialised. The viewer is
    /// eligible for re-initialisation afterwards; no entries carry over.
    pub fn terminate(&mut self) -> Result<(), LifecycleError> {
        let Some(open) = self.open.take() else {
            return Err(LifecycleError::NotInitialised {
                operation: "terminate",
            });
        };

        open.shared.send(WindowCommand::Close);
        open.handle.shutdown();
        tracing::info!("Viewer terminated");
        Ok(())
    }

    /// Number of entries currently retained by the open viewer.
    pub fn entry_count(&self) -> Result<usize, LifecycleError> {
        Ok(self.require_open("entry_count")?.shared.entry_count())
    }

    /// Entries evicted by the retention cap in this window lifetime.
    pub fn dropped(&self) -> Result<u64, LifecycleError> {
        Ok(self.require_open("dropped")?.shared.dropped())
    }

    /// The exact projection the window renders: retained entries, oldest
    /// first.
    pub fn snapshot(&self) -> Result<Vec<LogEntry>, LifecycleError> {
        Ok(self.require_open("snapshot")?.shared.snapshot())
    }

    fn require_open(&self, operation: &'static str) -> Result<&OpenViewer, LifecycleError> {
        self.open
            .as_ref()
            .ok_or(LifecycleError::NotInitialised { operation })
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide viewer instance used by the C surface.
pub fn global() -> &'static Mutex<Viewer> {
    static VIEWER: Mutex<Viewer> = Mutex::new(Viewer::new());
    &VIEWER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::backend::HeadlessBackend;

    #[test]
    fn starts_uninitialised() {
        let viewer = Viewer::new();
        assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
    }

    #[test]
    fn append_before_initialize_is_rejected() {
        let viewer = Viewer::new();
        assert_eq!(
            viewer.append("10:00", "INFO", "x"),
            Err(LifecycleError::NotInitialised { operation: "append" })
        );
    }

    #[test]
    fn show_before_initialize_is_rejected() {
        let viewer = Viewer::new();
        assert_eq!(
            viewer.show(),
            Err(LifecycleError::NotInitialised { operation: "show" })
        );
    }

    #[test]
    fn double_initialize_is_rejected() {
        let mut viewer = Viewer::new();
        viewer
            .initialize(&HeadlessBackend, ViewerOptions::default())
            .unwrap();
        assert_eq!(
            viewer.initialize(&HeadlessBackend, ViewerOptions::default()),
            Err(LifecycleError::AlreadyOpen)
        );
    }

    #[test]
    fn reinitialize_replaces_open_viewer() {
        let mut viewer = Viewer::new();
        viewer
            .initialize(&HeadlessBackend, ViewerOptions::default())
            .unwrap();
        viewer.append("10:00", "INFO", "old").unwrap();

        viewer
            .reinitialize(&HeadlessBackend, ViewerOptions::default())
            .unwrap();
        assert_eq!(viewer.lifecycle(), Lifecycle::Open);
        assert_eq!(viewer.entry_count(), Ok(0));
    }

    #[test]
    fn reinitialize_from_uninitialised_just_opens() {
        let mut viewer = Viewer::new();
        viewer
            .reinitialize(&HeadlessBackend, ViewerOptions::default())
            .unwrap();
        assert_eq!(viewer.lifecycle(), Lifecycle::Open);
    }

    #[test]
    fn terminate_returns_to_uninitialised() {
        let mut viewer = Viewer::new();
        viewer
            .initialize(&HeadlessBackend, ViewerOptions::default())
            .unwrap();
        assert_eq!(viewer.lifecycle(), Lifecycle::Open);

        viewer.terminate().unwrap();
        assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
        assert_eq!(
            viewer.terminate(),
            Err(LifecycleError::NotInitialised {
                operation: "terminate"
            })
        );
    }
}
