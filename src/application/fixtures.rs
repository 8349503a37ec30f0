// Shared snapshot fixtures for unit tests
use serde_json::{json, Value};

/// The smallest snapshot the dashboard accepts.
pub fn minimal_snapshot_json() -> Value {
    json!({
        "summary": {
            "total_enrolled": 100,
            "total_present": 95,
            "absence_rate": 5.0
        },
        "daily_trends": {
            "labels": ["2024-01-01", "2024-01-02"],
            "datasets": [{ "label": "A", "data": [10, 12] }]
        },
        "site_attendance": {
            "labels": ["Site A"],
            "datasets": [{ "label": "Present", "data": [50] }]
        },
        "site_distribution": {
            "labels": ["Site A", "Site B"],
            "datasets": [{ "label": "Share", "data": [60, 40] }]
        }
    })
}

pub fn minimal_snapshot_bytes() -> Vec<u8> {
    serde_json::to_vec(&minimal_snapshot_json()).unwrap()
}
