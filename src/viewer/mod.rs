// Sidelog - viewer/mod.rs
//
// The viewer component: process-wide lifecycle state machine, window
// backends, and the eframe window itself.

pub mod backend;
pub mod lifecycle;
pub mod window;

pub use backend::{EframeBackend, HeadlessBackend, WindowBackend};
pub use lifecycle::{global, Lifecycle, Viewer};
pub use window::ViewerOptions;
