// SnapSleuth - app/mod.rs
//
// Application layer: orchestration of rule loading and result reporting.
// Dependencies: core layer.

pub mod report;
pub mod rule_mgr;
