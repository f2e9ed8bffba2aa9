// Sidelog - tests/e2e_ffi.rs
//
// Tests for the C surface's no-op and null-safety contract. These
// deliberately never call initLogViewer: that would open a real window,
// which a test runner has no display for (the lifecycle behind it is
// covered headlessly in e2e_lifecycle.rs). Everything exercised here must
// leave the process-wide viewer untouched and must not crash.

use sidelog::ffi;
use sidelog::viewer::{global, Lifecycle};
use std::ffi::CString;
use std::ptr;

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

/// The reserved init hook returns 0 and is safe to call repeatedly.
#[test]
fn init_cxx_native_utils_returns_zero() {
    assert_eq!(ffi::init_cxx_native_utils(), 0);
    assert_eq!(ffi::init_cxx_native_utils(), 0);
}

/// addLogEntry without a prior initLogViewer records nothing and does not
/// crash.
#[test]
fn add_log_entry_before_init_is_a_noop() {
    let time = cstr("10:00");
    let level = cstr("INFO");
    let message = cstr("x");

    unsafe { ffi::add_log_entry(time.as_ptr(), level.as_ptr(), message.as_ptr()) };

    let viewer = global().lock().unwrap();
    assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
}

/// Null arguments are ignored, whatever the viewer state.
#[test]
fn add_log_entry_with_null_arguments_is_a_noop() {
    let time = cstr("10:00");
    let level = cstr("INFO");

    unsafe {
        ffi::add_log_entry(ptr::null(), level.as_ptr(), time.as_ptr());
        ffi::add_log_entry(time.as_ptr(), ptr::null(), ptr::null());
        ffi::add_log_entry(ptr::null(), ptr::null(), ptr::null());
    }

    let viewer = global().lock().unwrap();
    assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
}

/// showLogViewer before initLogViewer is a silent no-op.
#[test]
fn show_before_init_is_a_noop() {
    ffi::show_log_viewer();

    let viewer = global().lock().unwrap();
    assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
}

/// terminateCXXNativeUtils with no open viewer is a silent no-op, and stays
/// one on repeat calls.
#[test]
fn terminate_before_init_is_a_noop() {
    ffi::terminate_cxx_native_utils();
    ffi::terminate_cxx_native_utils();

    let viewer = global().lock().unwrap();
    assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
}
