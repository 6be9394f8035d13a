// SnapSleuth - lib.rs
//
// Library entry point, exposing the parser, query layer, rule loading,
// and configuration for the CLI and for integration testing.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
