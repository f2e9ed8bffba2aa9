// Sidelog - lib.rs
//
// Library entry point. Sidelog is a small companion log-viewer window that a
// host application drives through a C-callable lifecycle API: initialise,
// append entries, show, terminate.
//
// The crate builds as a staticlib/cdylib for non-Rust hosts (the `ffi`
// module is the linkable surface) and as an rlib for the preview binary and
// integration tests, which use the `viewer` module directly.

pub mod core;
pub mod ffi;
pub mod platform;
pub mod ui;
pub mod util;
pub mod viewer;
