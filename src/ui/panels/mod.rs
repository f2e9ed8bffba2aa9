// Sidelog - ui/panels/mod.rs

pub mod entries;
