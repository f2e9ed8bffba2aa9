// Sidelog - ui/mod.rs
//
// Rendering helpers for the viewer window.

pub mod panels;
pub mod theme;
