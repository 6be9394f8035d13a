// SnapSleuth - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app, platform, or touch config directories.

pub mod export;
pub mod model;
pub mod parser;
pub mod query;
pub mod rules;
