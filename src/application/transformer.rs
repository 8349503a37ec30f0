// Series transformer - Adapts validated snapshot slices into renderer-ready chart specs
use crate::application::format::DateFormat;
use crate::domain::chart::{ChartBinding, ChartKind, ChartOptions, ChartPayload, ChartSpec, ChartStyle, MetricKey};
use crate::domain::error::RenderBindingError;
use crate::domain::snapshot::{AttendanceSnapshot, DatasetSeries};
use serde_json::json;

const LINE_BORDER_WIDTH: f64 = 1.5;
const LINE_POINT_RADIUS: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct SeriesTransformer {
    style: ChartStyle,
    date_format: DateFormat,
}

impl SeriesTransformer {
    pub fn new(style: ChartStyle, date_format: DateFormat) -> Self {
        Self { style, date_format }
    }

    /// Build the chart spec for one binding. The snapshot is only read.
    pub fn chart_spec(
        &self,
        snapshot: &AttendanceSnapshot,
        binding: &ChartBinding,
    ) -> Result<ChartSpec, RenderBindingError> {
        let mut data = match binding.key {
            MetricKey::DailyTrends => {
                let trends = &snapshot.daily_trends;
                ensure_aligned(trends.labels.len(), &trends.datasets)?;
                ChartPayload {
                    labels: trends
                        .labels
                        .iter()
                        .map(|date| self.date_format.format(*date))
                        .collect(),
                    datasets: trends.datasets.clone(),
                }
            }
            MetricKey::SiteAttendance => {
                let sites = &snapshot.site_attendance;
                ensure_aligned(sites.labels.len(), &sites.datasets)?;
                ChartPayload {
                    labels: sites.labels.clone(),
                    datasets: sites.datasets.clone(),
                }
            }
            MetricKey::SiteDistribution => {
                let sites = &snapshot.site_distribution;
                ensure_aligned(sites.labels.len(), &sites.datasets)?;
                ChartPayload {
                    labels: sites.labels.clone(),
                    datasets: sites.datasets.clone(),
                }
            }
        };

        if binding.kind == ChartKind::Line {
            for dataset in &mut data.datasets {
                dataset.decorate_default("borderWidth", json!(LINE_BORDER_WIDTH));
                dataset.decorate_default("pointRadius", json!(LINE_POINT_RADIUS));
            }
        }

        Ok(ChartSpec {
            kind: binding.kind,
            data,
            options: ChartOptions::base(&self.style).with_overrides(&binding.overrides),
        })
    }
}

/// Validation already guarantees this; a misaligned chart is dropped rather than drawn truncated.
fn ensure_aligned(label_count: usize, datasets: &[DatasetSeries]) -> Result<(), RenderBindingError> {
    match datasets.iter().find(|ds| ds.data.len() != label_count) {
        Some(ds) => Err(RenderBindingError::LengthMismatch {
            dataset: ds.label.clone(),
            labels: label_count,
            data: ds.data.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::composer::BINDINGS;
    use crate::application::fixtures::minimal_snapshot_json;
    use crate::application::validation::validate_snapshot;
    use crate::domain::chart::LegendPosition;
    use chrono::NaiveDate;

    fn transformer() -> SeriesTransformer {
        SeriesTransformer::new(ChartStyle::default(), DateFormat::default())
    }

    fn binding(key: MetricKey) -> &'static ChartBinding {
        BINDINGS.iter().find(|b| b.key == key).unwrap()
    }

    fn snapshot() -> AttendanceSnapshot {
        validate_snapshot(&minimal_snapshot_json()).unwrap()
    }

    #[test]
    fn test_trend_labels_preserve_order_and_cardinality() {
        let transformer = transformer();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        for len in 0..40u64 {
            let mut snapshot = snapshot();
            // Deliberately unsorted so any reordering would show.
            let labels: Vec<NaiveDate> = (0..len)
                .map(|i| start + chrono::Days::new((i * 7) % 31))
                .collect();
            snapshot.daily_trends.labels = labels.clone();
            snapshot.daily_trends.datasets = vec![DatasetSeries::new(
                "Present",
                (0..len).map(|i| i as f64).collect(),
            )];

            let spec = transformer
                .chart_spec(&snapshot, binding(MetricKey::DailyTrends))
                .unwrap();

            assert_eq!(spec.data.labels.len(), labels.len());
            for (display, date) in spec.data.labels.iter().zip(&labels) {
                assert_eq!(display, &date.format("%-m/%-d/%Y").to_string());
            }
        }
    }

    #[test]
    fn test_trend_datasets_get_line_defaults_without_overriding() {
        let mut snapshot = snapshot();
        snapshot.daily_trends.datasets[0]
            .decoration
            .insert("borderWidth".to_string(), json!(4));
        snapshot.daily_trends.datasets[0]
            .decoration
            .insert("borderColor".to_string(), json!("#ff6384"));

        let spec = transformer()
            .chart_spec(&snapshot, binding(MetricKey::DailyTrends))
            .unwrap();
        let decoration = &spec.data.datasets[0].decoration;

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(decoration["borderWidth"], json!(4));
        assert_eq!(decoration["borderColor"], json!("#ff6384"));
        assert_eq!(decoration["pointRadius"], json!(2.0));
        assert_eq!(spec.data.datasets[0].data, vec![10.0, 12.0]);
        assert!(spec.options.plugins.tooltip.is_some());

        // The snapshot itself is untouched.
        assert!(!snapshot.daily_trends.datasets[0]
            .decoration
            .contains_key("pointRadius"));
    }

    #[test]
    fn test_site_series_pass_through_unchanged() {
        let mut snapshot = snapshot();
        snapshot.site_attendance.labels = vec!["North".into(), "South".into(), "East".into()];
        snapshot.site_attendance.datasets = vec![
            DatasetSeries::new("Present", vec![120.0, 0.0, 87.5]),
            DatasetSeries::new("Absent", vec![3.0, 4.0, 1.0]),
        ];

        for key in [MetricKey::SiteAttendance, MetricKey::SiteDistribution] {
            let spec = transformer().chart_spec(&snapshot, binding(key)).unwrap();
            let input = match key {
                MetricKey::SiteAttendance => &snapshot.site_attendance,
                _ => &snapshot.site_distribution,
            };

            assert_eq!(spec.data.labels, input.labels);
            assert_eq!(spec.data.datasets, input.datasets);
        }
    }

    #[test]
    fn test_pie_legend_never_matches_default_placement() {
        let snapshot = snapshot();
        for legend_position in [
            LegendPosition::Top,
            LegendPosition::Bottom,
            LegendPosition::Left,
            LegendPosition::Right,
        ] {
            let style = ChartStyle {
                legend_position,
                ..ChartStyle::default()
            };
            let transformer = SeriesTransformer::new(style, DateFormat::default());

            let pie = transformer
                .chart_spec(&snapshot, binding(MetricKey::SiteDistribution))
                .unwrap();
            let bar = transformer
                .chart_spec(&snapshot, binding(MetricKey::SiteAttendance))
                .unwrap();
            let line = transformer
                .chart_spec(&snapshot, binding(MetricKey::DailyTrends))
                .unwrap();

            assert_eq!(bar.options.plugins.legend.position, legend_position);
            assert_eq!(line.options.plugins.legend.position, legend_position);
            assert_ne!(pie.options.plugins.legend.position, legend_position);
        }
    }

    #[test]
    fn test_misaligned_input_fails_closed() {
        let mut snapshot = snapshot();
        snapshot.site_distribution.datasets[0].data.pop();

        let err = transformer()
            .chart_spec(&snapshot, binding(MetricKey::SiteDistribution))
            .unwrap_err();
        assert_eq!(
            err,
            RenderBindingError::LengthMismatch {
                dataset: "Share".to_string(),
                labels: 2,
                data: 1,
            }
        );
    }
}
