// Chart.js configuration renderer
use crate::application::chart_renderer::{ChartRenderer, RenderedChart};
use crate::domain::chart::{ChartKind, ChartOptions, ChartPayload, ChartSpec, MetricKey};
use crate::domain::error::RenderBindingError;
use serde::Serialize;

/// `new Chart(canvas, config)` argument.
#[derive(Serialize)]
struct ChartJsConfig<'a> {
    #[serde(rename = "type")]
    kind: ChartKind,
    data: &'a ChartPayload,
    options: &'a ChartOptions,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChartJsRenderer;

impl ChartRenderer for ChartJsRenderer {
    fn render(&self, key: MetricKey, spec: &ChartSpec) -> Result<RenderedChart, RenderBindingError> {
        let config = serde_json::to_value(ChartJsConfig {
            kind: spec.kind,
            data: &spec.data,
            options: &spec.options,
        })
        .map_err(|e| RenderBindingError::Encode(e.to_string()))?;

        Ok(RenderedChart {
            key,
            kind: spec.kind,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartStyle, LegendOverride, OptionOverrides};
    use crate::domain::snapshot::DatasetSeries;
    use serde_json::json;

    #[test]
    fn test_renders_chartjs_config() {
        let mut dataset = DatasetSeries::new("Share", vec![60.0, 40.0]);
        dataset
            .decoration
            .insert("backgroundColor".to_string(), json!(["#36a2eb", "#ff6384"]));
        let spec = ChartSpec {
            kind: ChartKind::Pie,
            data: ChartPayload {
                labels: vec!["Site A".to_string(), "Site B".to_string()],
                datasets: vec![dataset],
            },
            options: ChartOptions::base(&ChartStyle::default()).with_overrides(&OptionOverrides {
                legend: LegendOverride::Secondary,
                tooltip_fonts: false,
                hide_scales: true,
            }),
        };

        let chart = ChartJsRenderer.render(MetricKey::SiteDistribution, &spec).unwrap();

        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.config["type"], "pie");
        assert_eq!(chart.config["data"]["labels"], json!(["Site A", "Site B"]));
        assert_eq!(chart.config["data"]["datasets"][0]["data"], json!([60.0, 40.0]));
        assert_eq!(
            chart.config["data"]["datasets"][0]["backgroundColor"],
            json!(["#36a2eb", "#ff6384"])
        );
        assert_eq!(chart.config["options"]["plugins"]["legend"]["position"], "right");
        assert!(chart.config["options"].get("scales").is_none());
    }
}
