// Application layer - Validation, transformation, layout and the session controller
pub mod chart_renderer;
pub mod composer;
pub mod controller;
pub mod diagnostics;
pub mod format;
pub mod snapshot_source;
pub mod transformer;
pub mod validation;

#[cfg(test)]
pub mod fixtures;
