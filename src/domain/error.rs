// Error taxonomy for loading, validating and binding the attendance snapshot
use super::chart::ChartKind;
use serde::Serialize;
use thiserror::Error;

/// The snapshot resource could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read snapshot file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("snapshot request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

/// The retrieved payload is not a well-formed attendance snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("snapshot is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("`{path}` must be {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("`{path}` has {data} values but the chart has {labels} labels")]
    LengthMismatch {
        path: String,
        labels: usize,
        data: usize,
    },

    #[error("`{path}` is not a valid ISO-8601 date: {value:?}")]
    InvalidDate { path: String, value: String },

    #[error("`{path}` repeats the label {label:?}")]
    DuplicateLabel { path: String, label: String },

    #[error("`{path}` is {value}, expected a percentage between 0 and 100")]
    OutOfRange { path: String, value: f64 },

    #[error("summary reports {present} present out of {enrolled} enrolled")]
    Inconsistent { present: u64, enrolled: u64 },
}

/// A single chart section cannot be bound to its renderer.
///
/// Unlike [`DashboardError`] this never fails the whole dashboard: the affected
/// section is marked unavailable and the rest still renders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderBindingError {
    #[error("dataset {dataset:?} has {data} values for {labels} labels")]
    LengthMismatch {
        dataset: String,
        labels: usize,
        data: usize,
    },

    #[error("no renderer registered for {0} charts")]
    UnregisteredKind(ChartKind),

    #[error("chart configuration could not be encoded: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Fetch,
    Schema,
}

/// Terminal failure of a dashboard session.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Fetch(_) => ErrorKind::Fetch,
            DashboardError::Schema(_) => ErrorKind::Schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_error_kind() {
        let err: DashboardError = SchemaError::MissingField {
            path: "site_distribution".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.to_string(), "missing required field `site_distribution`");

        let err: DashboardError = FetchError::Status {
            url: "http://localhost/attendance_dashboard.json".to_string(),
            status: 404,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }
}
