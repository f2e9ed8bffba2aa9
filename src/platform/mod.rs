// Sidelog - platform/mod.rs
//
// Platform integration: config/data directories, config.toml loading,
// parent-process liveness.

pub mod config;
pub mod parent_watch;
