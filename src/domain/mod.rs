// Domain layer - Snapshot, chart and render tree models
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod snapshot;
