// Sidelog - tests/e2e_lifecycle.rs
//
// End-to-end tests for the viewer lifecycle through the public library
// surface, using the headless backend so no display is needed. The snapshot
// a test reads is the exact projection the window renders, so "displayed
// entries" properties are checked here without opening a window.

use sidelog::util::error::LifecycleError;
use sidelog::viewer::{EframeBackend, HeadlessBackend, Lifecycle, Viewer, ViewerOptions};

fn open_viewer() -> Viewer {
    let mut viewer = Viewer::new();
    viewer
        .initialize(&HeadlessBackend, ViewerOptions::default())
        .expect("headless initialise");
    viewer
}

// =============================================================================
// Append/display parity
// =============================================================================

/// Every append between initialise and terminate is displayed, in call order.
#[test]
fn e2e_appends_display_in_call_order() {
    let viewer = open_viewer();

    viewer.append("10:00", "INFO", "started").unwrap();
    viewer.append("10:01", "ERROR", "failed").unwrap();
    viewer.show().unwrap();

    let rows = viewer.snapshot().unwrap();
    assert_eq!(viewer.entry_count().unwrap(), 2);
    assert_eq!(
        rows.iter()
            .map(|e| (e.time.as_str(), e.level.as_str(), e.message.as_str()))
            .collect::<Vec<_>>(),
        vec![("10:00", "INFO", "started"), ("10:01", "ERROR", "failed")]
    );
}

/// Entry count equals the number of append calls while below the cap.
#[test]
fn e2e_count_matches_appends_below_cap() {
    let viewer = open_viewer();
    for i in 0..100 {
        viewer.append("t", "INFO", &format!("m{i}")).unwrap();
    }
    assert_eq!(viewer.entry_count().unwrap(), 100);
    assert_eq!(viewer.dropped().unwrap(), 0);
}

/// Above the cap, the newest entries are retained and drops are counted.
#[test]
fn e2e_cap_retains_newest_entries() {
    let mut viewer = Viewer::new();
    viewer
        .initialize(
            &HeadlessBackend,
            ViewerOptions {
                max_entries: 100,
                ..ViewerOptions::default()
            },
        )
        .unwrap();

    for i in 0..130 {
        viewer.append("t", "INFO", &format!("m{i}")).unwrap();
    }

    assert_eq!(viewer.entry_count().unwrap(), 100);
    assert_eq!(viewer.dropped().unwrap(), 30);
    let rows = viewer.snapshot().unwrap();
    assert_eq!(rows.first().unwrap().message, "m30");
    assert_eq!(rows.last().unwrap().message, "m129");
}

// =============================================================================
// Real backend launch honesty
// =============================================================================

/// Initialising with the real window backend reports its true outcome:
/// either the event loop is running and the viewer is Open (with a display
/// available), or initialise fails and the viewer stays Uninitialised (no
/// display, as in CI). It must never report Open over a dead window thread.
#[test]
fn e2e_eframe_launch_outcome_matches_lifecycle() {
    let mut viewer = Viewer::new();
    match viewer.initialize(&EframeBackend, ViewerOptions::default()) {
        Ok(()) => {
            assert_eq!(viewer.lifecycle(), Lifecycle::Open);
            viewer.terminate().unwrap();
        }
        Err(LifecycleError::BackendLaunch { .. }) => {
            assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
        }
        Err(e) => panic!("unexpected initialise error: {e}"),
    }
}

// =============================================================================
// Invalid-state operations
// =============================================================================

/// append before any initialise has no observable effect and reports why.
#[test]
fn e2e_append_before_initialize_is_rejected() {
    let viewer = Viewer::new();
    let err = viewer.append("10:00", "INFO", "x").unwrap_err();
    assert_eq!(err, LifecycleError::NotInitialised { operation: "append" });
    assert_eq!(viewer.lifecycle(), Lifecycle::Uninitialised);
}

/// show before initialise has no observable effect.
#[test]
fn e2e_show_before_initialize_is_rejected() {
    let viewer = Viewer::new();
    assert!(matches!(
        viewer.show(),
        Err(LifecycleError::NotInitialised { .. })
    ));
}

/// append after terminate is rejected, not a crash.
#[test]
fn e2e_append_after_terminate_is_rejected() {
    let mut viewer = open_viewer();
    viewer.append("10:00", "INFO", "x").unwrap();
    viewer.terminate().unwrap();

    assert!(matches!(
        viewer.append("10:01", "INFO", "y"),
        Err(LifecycleError::NotInitialised { .. })
    ));
}

// =============================================================================
// Teardown/recreate
// =============================================================================

/// A re-initialised viewer starts with zero entries and a fresh seq space.
#[test]
fn e2e_reinitialize_starts_empty() {
    let mut viewer = open_viewer();
    viewer.append("10:00", "INFO", "old").unwrap();
    assert_eq!(viewer.entry_count().unwrap(), 1);

    viewer.terminate().unwrap();
    viewer
        .initialize(&HeadlessBackend, ViewerOptions::default())
        .unwrap();

    assert_eq!(viewer.entry_count().unwrap(), 0);
    let seq = viewer.append("10:05", "INFO", "new").unwrap();
    assert_eq!(seq, 0);
}

/// The recreate path the C surface takes on repeated initialisation:
/// `reinitialize` over an open viewer tears the old window down and the
/// recreated viewer starts with an empty list and a fresh seq space.
#[test]
fn e2e_recreate_over_open_viewer_starts_empty() {
    let mut viewer = open_viewer();
    viewer.append("10:00", "INFO", "first window").unwrap();
    viewer.append("10:01", "ERROR", "also first window").unwrap();

    viewer
        .reinitialize(&HeadlessBackend, ViewerOptions::default())
        .unwrap();

    assert_eq!(viewer.lifecycle(), Lifecycle::Open);
    assert!(viewer.snapshot().unwrap().is_empty());
    let seq = viewer.append("10:05", "INFO", "fresh").unwrap();
    assert_eq!(seq, 0);
}

/// Initialising over an open viewer is rejected; the open window keeps its
/// entries.
#[test]
fn e2e_double_initialize_keeps_existing_window() {
    let mut viewer = open_viewer();
    viewer.append("10:00", "INFO", "kept").unwrap();

    assert_eq!(
        viewer.initialize(&HeadlessBackend, ViewerOptions::default()),
        Err(LifecycleError::AlreadyOpen)
    );
    assert_eq!(viewer.entry_count().unwrap(), 1);
    assert_eq!(viewer.snapshot().unwrap()[0].message, "kept");
}
