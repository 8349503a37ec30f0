// Snapshot schema validation - raw JSON in, validated snapshot or first violation out
use crate::domain::error::SchemaError;
use crate::domain::snapshot::{AttendanceSnapshot, ChartInput, DatasetSeries, Summary, SummaryFigures};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Decode and validate a snapshot payload.
pub fn parse_snapshot(payload: &[u8]) -> Result<AttendanceSnapshot, SchemaError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    validate_snapshot(&value)
}

/// Validate a decoded snapshot. Nothing is accepted unless everything is.
pub fn validate_snapshot(value: &Value) -> Result<AttendanceSnapshot, SchemaError> {
    let root = object(value, "$")?;

    let (summary_value, path) = required(root, "", "summary")?;
    let summary = summary(summary_value, &path)?;

    let (trends_value, path) = required(root, "", "daily_trends")?;
    let daily_trends = chart_input(trends_value, &path, parse_date)?;

    let (attendance_value, path) = required(root, "", "site_attendance")?;
    let site_attendance = chart_input(attendance_value, &path, unique_labels())?;

    let (distribution_value, path) = required(root, "", "site_distribution")?;
    let site_distribution = chart_input(distribution_value, &path, unique_labels())?;

    Ok(AttendanceSnapshot {
        summary,
        daily_trends,
        site_attendance,
        site_distribution,
    })
}

fn summary(value: &Value, path: &str) -> Result<Summary, SchemaError> {
    let obj = object(value, path)?;
    let current = figures(obj, path)?;

    // A nested `previous` inside `previous` is ignored.
    let previous = match obj.get("previous") {
        None | Some(Value::Null) => None,
        Some(prev) => {
            let prev_path = join(path, "previous");
            Some(figures(object(prev, &prev_path)?, &prev_path)?)
        }
    };

    Ok(Summary { current, previous })
}

fn figures(obj: &Map<String, Value>, path: &str) -> Result<SummaryFigures, SchemaError> {
    let total_enrolled = count(obj, path, "total_enrolled")?;
    let total_present = count(obj, path, "total_present")?;

    let (value, rate_path) = required(obj, path, "absence_rate")?;
    let absence_rate = value.as_f64().ok_or_else(|| SchemaError::WrongType {
        path: rate_path.clone(),
        expected: "a number",
    })?;
    if !(0.0..=100.0).contains(&absence_rate) {
        return Err(SchemaError::OutOfRange {
            path: rate_path,
            value: absence_rate,
        });
    }

    if total_present > total_enrolled {
        return Err(SchemaError::Inconsistent {
            present: total_present,
            enrolled: total_enrolled,
        });
    }

    Ok(SummaryFigures {
        total_enrolled,
        total_present,
        absence_rate,
    })
}

fn count(obj: &Map<String, Value>, parent: &str, name: &str) -> Result<u64, SchemaError> {
    let (value, path) = required(obj, parent, name)?;
    value.as_u64().ok_or(SchemaError::WrongType {
        path,
        expected: "a non-negative integer",
    })
}

fn chart_input<L>(
    value: &Value,
    path: &str,
    mut parse_label: impl FnMut(&str, &str) -> Result<L, SchemaError>,
) -> Result<ChartInput<L>, SchemaError> {
    let obj = object(value, path)?;

    let (labels_value, labels_path) = required(obj, path, "labels")?;
    let raw_labels = array(labels_value, &labels_path)?;
    let mut labels = Vec::with_capacity(raw_labels.len());
    for (idx, label) in raw_labels.iter().enumerate() {
        let label_path = format!("{labels_path}[{idx}]");
        let text = label.as_str().ok_or_else(|| SchemaError::WrongType {
            path: label_path.clone(),
            expected: "a string",
        })?;
        labels.push(parse_label(text, &label_path)?);
    }

    let (datasets_value, datasets_path) = required(obj, path, "datasets")?;
    let raw_datasets = array(datasets_value, &datasets_path)?;
    let mut datasets = Vec::with_capacity(raw_datasets.len());
    for (idx, dataset) in raw_datasets.iter().enumerate() {
        let dataset_path = format!("{datasets_path}[{idx}]");
        datasets.push(dataset_series(dataset, &dataset_path, labels.len())?);
    }

    Ok(ChartInput { labels, datasets })
}

fn dataset_series(value: &Value, path: &str, label_count: usize) -> Result<DatasetSeries, SchemaError> {
    let obj = object(value, path)?;

    let (label_value, label_path) = required(obj, path, "label")?;
    let label = label_value
        .as_str()
        .ok_or(SchemaError::WrongType {
            path: label_path,
            expected: "a string",
        })?
        .to_string();

    let (data_value, data_path) = required(obj, path, "data")?;
    let raw_data = array(data_value, &data_path)?;
    if raw_data.len() != label_count {
        return Err(SchemaError::LengthMismatch {
            path: data_path,
            labels: label_count,
            data: raw_data.len(),
        });
    }
    let mut data = Vec::with_capacity(raw_data.len());
    for (idx, point) in raw_data.iter().enumerate() {
        let point = point.as_f64().ok_or_else(|| SchemaError::WrongType {
            path: format!("{data_path}[{idx}]"),
            expected: "a number",
        })?;
        data.push(point);
    }

    let decoration = obj
        .iter()
        .filter(|(key, _)| key.as_str() != "label" && key.as_str() != "data")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(DatasetSeries {
        decoration,
        ..DatasetSeries::new(label, data)
    })
}

fn parse_date(text: &str, path: &str) -> Result<NaiveDate, SchemaError> {
    // Date-times keep the calendar date they were written with.
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .map_err(|_| SchemaError::InvalidDate {
            path: path.to_string(),
            value: text.to_string(),
        })
}

fn unique_labels() -> impl FnMut(&str, &str) -> Result<String, SchemaError> {
    let mut seen = HashSet::new();
    move |text: &str, path: &str| {
        if seen.insert(text.to_string()) {
            Ok(text.to_string())
        } else {
            Err(SchemaError::DuplicateLabel {
                path: path.to_string(),
                label: text.to_string(),
            })
        }
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    name: &str,
) -> Result<(&'a Value, String), SchemaError> {
    let path = join(parent, name);
    match obj.get(name) {
        None | Some(Value::Null) => Err(SchemaError::MissingField { path }),
        Some(value) => Ok((value, path)),
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| SchemaError::WrongType {
        path: path.to_string(),
        expected: "an object",
    })
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value.as_array().ok_or_else(|| SchemaError::WrongType {
        path: path.to_string(),
        expected: "an array",
    })
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
