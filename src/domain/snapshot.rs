// Attendance snapshot domain model (validated, read-only)
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Headline figures. `absence_rate` is trusted as given, never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFigures {
    pub total_enrolled: u64,
    pub total_present: u64,
    pub absence_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub current: SummaryFigures,
    /// Figures for the previous period, when the snapshot carries them.
    pub previous: Option<SummaryFigures>,
}

/// One series of a chart input. Anything besides `label` and `data`
/// (colors, styles) is renderer decoration and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSeries {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub decoration: Map<String, Value>,
}

impl DatasetSeries {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            decoration: Map::new(),
        }
    }

    /// Set a decoration field only when the snapshot did not supply one.
    pub fn decorate_default(&mut self, key: &str, value: Value) {
        self.decoration.entry(key.to_string()).or_insert(value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInput<L> {
    pub labels: Vec<L>,
    pub datasets: Vec<DatasetSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSnapshot {
    pub summary: Summary,
    pub daily_trends: ChartInput<NaiveDate>,
    pub site_attendance: ChartInput<String>,
    pub site_distribution: ChartInput<String>,
}
