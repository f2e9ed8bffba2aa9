// Sidelog - ffi.rs
//
// C-callable surface consumed by the host application. Symbol names follow
// the host's existing bridging declarations, so hosts link unchanged; see
// include/sidelog.h.
//
// Contract at this layer:
//   - initLogViewer returns 0 on success;
//   - every other operation degrades to a silent no-op when the viewer is
//     not initialised;
//   - nothing here may ever crash the host, so every export runs inside
//     catch_unwind.
//
// The richer Result-based contract lives one layer down in viewer::lifecycle.

use crate::platform::config;
use crate::util::logging;
use crate::viewer::{self, EframeBackend, ViewerOptions};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run an FFI body, swallowing panics. `fallback` is returned if the body
/// panics; the panic is logged, never propagated across the boundary.
fn guarded<T>(name: &'static str, fallback: T, body: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            tracing::error!(function = name, "Panic caught at FFI boundary");
            fallback
        }
    }
}

/// Copy a caller-owned C string. None for null; invalid UTF-8 is lossily
/// converted (the display contract is pass-through text, not validation).
///
/// # Safety
/// `ptr` must be null or point to a null-terminated string valid for the
/// duration of the call.
unsafe fn text_arg(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// Build viewer options from config.toml (or defaults), initialising the
/// logging subsystem along the way.
fn startup_options() -> ViewerOptions {
    let paths = config::PlatformPaths::resolve();
    let (cfg, warnings) = config::load_config(&paths.config_dir);
    logging::init(false, cfg.log_level.as_deref());
    for w in &warnings {
        tracing::warn!("{}", w);
    }
    ViewerOptions {
        width: cfg.window_width,
        height: cfg.window_height,
        max_entries: cfg.max_entries,
        ..ViewerOptions::default()
    }
}

/// Reserved initialisation hook. Sets up logging (idempotent) and returns 0.
/// Hosts may call it before or after `initLogViewer`, or not at all.
#[export_name = "initCXXNativeUtils"]
pub extern "C" fn init_cxx_native_utils() -> c_int {
    guarded("initCXXNativeUtils", 0, || {
        logging::init(false, None);
        0
    })
}

/// Create the viewer window. Returns 0 on success, 1 if the window backend
/// could not be launched.
///
/// `host_window` is the host application's window handle. It is accepted
/// for ABI compatibility and logged; the viewer centres itself on screen
/// rather than anchoring to the host window.
///
/// If a viewer is already open it is torn down and recreated, so repeated
/// initialisation can never leak a window.
///
/// # Safety
/// `host_window` may be null; it is never dereferenced.
#[export_name = "initLogViewer"]
pub extern "C" fn init_log_viewer(host_window: *mut c_void) -> c_int {
    guarded("initLogViewer", 1, || {
        let options = startup_options();
        tracing::debug!(host_window = ?host_window, "initLogViewer");

        let mut viewer = viewer::global().lock().unwrap_or_else(|e| e.into_inner());
        match viewer.reinitialize(&EframeBackend, options) {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!(error = %e, "initLogViewer failed");
                1
            }
        }
    })
}

/// Append one entry to the viewer. Silent no-op when the viewer is not
/// initialised or any argument is null.
///
/// # Safety
/// Each pointer must be null or a caller-owned null-terminated string valid
/// for the duration of the call; none are retained.
#[export_name = "addLogEntry"]
pub unsafe extern "C" fn add_log_entry(
    time: *const c_char,
    level: *const c_char,
    message: *const c_char,
) {
    guarded("addLogEntry", (), || {
        let (Some(time), Some(level), Some(message)) =
            (text_arg(time), text_arg(level), text_arg(message))
        else {
            tracing::debug!("addLogEntry ignored: null argument");
            return;
        };

        let viewer = viewer::global().lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = viewer.append(&time, &level, &message) {
            tracing::debug!(error = %e, "addLogEntry ignored");
        }
    })
}

/// Centre the viewer window on screen and make it visible. Silent no-op
/// when the viewer is not initialised.
#[export_name = "showLogViewer"]
pub extern "C" fn show_log_viewer() {
    guarded("showLogViewer", (), || {
        let viewer = viewer::global().lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = viewer.show() {
            tracing::debug!(error = %e, "showLogViewer ignored");
        }
    })
}

/// Destroy the viewer window, returning the process-wide state to
/// Uninitialised. Silent no-op when the viewer is not initialised. A later
/// `initLogViewer` starts from an empty entry list.
#[export_name = "terminateCXXNativeUtils"]
pub extern "C" fn terminate_cxx_native_utils() {
    guarded("terminateCXXNativeUtils", (), || {
        let mut viewer = viewer::global().lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = viewer.terminate() {
            tracing::debug!(error = %e, "terminateCXXNativeUtils ignored");
        }
    })
}
