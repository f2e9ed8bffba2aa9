// Sidelog - viewer/backend.rs
//
// Window backend seam. The lifecycle state machine talks to a backend trait
// rather than to eframe directly, so the lifecycle is testable (and usable
// in display-less CI) through the headless backend.

use crate::util::error::LifecycleError;
use crate::viewer::window::{self, SharedState, ViewerOptions, WindowCommand};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{mpsc, Arc};

/// Launches a window for one viewer lifetime.
pub trait WindowBackend {
    /// Launch the window over the given shared state. Blocks at most until
    /// the window reports that it is running (or that it failed to start);
    /// the returned handle is held until terminate.
    fn launch(
        &self,
        shared: Arc<SharedState>,
        options: &ViewerOptions,
    ) -> Result<Box<dyn WindowHandle>, LifecycleError>;
}

/// Handle to a launched window; consumed by terminate.
pub trait WindowHandle: Send {
    /// Tear the window down and release its resources. The Close command has
    /// already been queued on the shared state by the time this is called.
    fn shutdown(self: Box<Self>);
}

impl std::fmt::Debug for dyn WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WindowHandle")
    }
}

// =============================================================================
// eframe backend
// =============================================================================

/// The real backend: runs the eframe event loop on a dedicated thread.
///
/// `launch` performs a startup handshake with that thread and only returns
/// `Ok` once the event loop is actually running; a loop that errors or
/// panics before then surfaces as `BackendLaunch`.
///
/// Platform note: creating an event loop off the main thread works on
/// Windows and Linux (`with_any_thread`). macOS requires the event loop on
/// its main thread, so there `launch` fails and embedders drive the window
/// from the main thread with [`window::run_blocking`] instead.
#[derive(Debug, Default)]
pub struct EframeBackend;

struct EframeHandle {
    thread: std::thread::JoinHandle<()>,
}

type ReadySender = mpsc::Sender<Result<(), LifecycleError>>;

/// Spawn the window thread and wait for its startup report.
///
/// `run` must send `Ok(())` on the sender once its event loop is up. If it
/// instead returns an error, panics, or finishes without ever reporting
/// ready, the failure is returned here and the thread is joined, so a dead
/// window can never be mistaken for a launched one.
fn launch_on_thread<F>(run: F) -> Result<Box<dyn WindowHandle>, LifecycleError>
where
    F: FnOnce(ReadySender) -> Result<(), LifecycleError> + Send + 'static,
{
    let (ready_tx, ready_rx) = mpsc::channel();
    let thread = std::thread::Builder::new()
        .name("sidelog-window".to_string())
        .spawn(move || {
            let failure_tx = ready_tx.clone();
            match catch_unwind(AssertUnwindSafe(|| run(ready_tx))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Viewer window exited with error");
                    let _ = failure_tx.send(Err(e));
                }
                Err(_) => {
                    tracing::error!("Viewer window thread panicked");
                    let _ = failure_tx.send(Err(LifecycleError::BackendLaunch {
                        reason: "window event loop panicked during startup".to_string(),
                    }));
                }
            }
        })
        .map_err(|e| LifecycleError::BackendLaunch {
            reason: e.to_string(),
        })?;

    // First report wins: Ok once the loop runs, Err if it died first. A
    // disconnect means the thread finished without ever reporting ready.
    match ready_rx.recv() {
        Ok(Ok(())) => Ok(Box::new(EframeHandle { thread })),
        Ok(Err(e)) => {
            let _ = thread.join();
            Err(e)
        }
        Err(mpsc::RecvError) => {
            let _ = thread.join();
            Err(LifecycleError::BackendLaunch {
                reason: "window thread exited before the event loop started".to_string(),
            })
        }
    }
}

impl WindowBackend for EframeBackend {
    fn launch(
        &self,
        shared: Arc<SharedState>,
        options: &ViewerOptions,
    ) -> Result<Box<dyn WindowHandle>, LifecycleError> {
        let options = options.clone();
        launch_on_thread(move |ready| window::run_event_loop(shared, &options, Some(ready)))
    }
}

impl WindowHandle for EframeHandle {
    fn shutdown(self: Box<Self>) {
        // The Close command wakes the event loop; wait for it to wind down
        // so the window is fully gone before terminate returns. The thread
        // catches its own panics, so the join itself cannot fail.
        let _ = self.thread.join();
    }
}

// =============================================================================
// Headless backend
// =============================================================================

/// Backend that opens no window at all. The lifecycle, buffer, and command
/// queue behave exactly as with the real backend; nothing renders.
///
/// Used by the integration tests and available to embedders running without
/// a display.
#[derive(Debug, Default)]
pub struct HeadlessBackend;

struct HeadlessHandle {
    shared: Arc<SharedState>,
}

impl WindowBackend for HeadlessBackend {
    fn launch(
        &self,
        shared: Arc<SharedState>,
        _options: &ViewerOptions,
    ) -> Result<Box<dyn WindowHandle>, LifecycleError> {
        Ok(Box::new(HeadlessHandle { shared }))
    }
}

impl WindowHandle for HeadlessHandle {
    fn shutdown(self: Box<Self>) {
        // Consume whatever the real window thread would have drained.
        let drained = self.shared.drain_commands();
        debug_assert!(drained.contains(&WindowCommand::Close));
    }
}
