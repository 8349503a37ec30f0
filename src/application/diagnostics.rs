// Diagnostics - Reporting sink for load and validation failures
use crate::domain::error::{DashboardError, ErrorKind};
use serde::Serialize;

/// Structured failure notification: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&DashboardError> for Diagnostic {
    fn from(err: &DashboardError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as `error` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!(
            kind = ?diagnostic.kind,
            message = %diagnostic.message,
            "attendance dashboard failed to load"
        );
    }
}
