// Sidelog - core/mod.rs
//
// Core layer: entry model, retention buffer, export.
// No UI, no FFI, no platform dependencies.

pub mod buffer;
pub mod export;
pub mod model;
