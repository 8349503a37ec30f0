// Chart payload and options models consumed by the rendering capability
use super::snapshot::DatasetSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot slices that can be bound to a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    DailyTrends,
    SiteAttendance,
    SiteDistribution,
}

impl MetricKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::DailyTrends => "daily_trends",
            MetricKey::SiteAttendance => "site_attendance",
            MetricKey::SiteDistribution => "site_distribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl LegendPosition {
    /// Placement used by charts that must keep their legend off the default edge.
    pub fn secondary(self) -> Self {
        match self {
            LegendPosition::Right => LegendPosition::Left,
            _ => LegendPosition::Right,
        }
    }
}

/// Dashboard-wide chart styling, taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub legend_position: LegendPosition,
    pub font_size: u32,
    pub legend_box_width: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            legend_position: LegendPosition::Top,
            font_size: 10,
            legend_box_width: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LegendOverride {
    #[default]
    Inherit,
    Secondary,
}

/// Per-binding adjustments merged over the base options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptionOverrides {
    pub legend: LegendOverride,
    pub tooltip_fonts: bool,
    pub hide_scales: bool,
}

/// Which row of the dashboard a chart lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Trend,
    Sites,
}

/// Static binding of a snapshot slice to a chart type and its presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBinding {
    pub key: MetricKey,
    pub kind: ChartKind,
    pub title: &'static str,
    pub section: Section,
    pub flex: f32,
    pub overrides: OptionOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub box_width: u32,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub position: LegendPosition,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub body_font: FontSpec,
    pub title_font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOptions {
    pub legend: LegendOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOptions {
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOptions {
    pub ticks: TickOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: PluginOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl ChartOptions {
    pub fn base(style: &ChartStyle) -> Self {
        let font = FontSpec {
            size: style.font_size,
        };
        let axis = AxisOptions {
            ticks: TickOptions { font },
        };

        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: PluginOptions {
                legend: LegendOptions {
                    position: style.legend_position,
                    labels: LegendLabels {
                        box_width: style.legend_box_width,
                        font,
                    },
                },
                tooltip: None,
            },
            scales: Some(Scales {
                x: axis.clone(),
                y: axis,
            }),
        }
    }

    pub fn with_overrides(mut self, overrides: &OptionOverrides) -> Self {
        if overrides.legend == LegendOverride::Secondary {
            self.plugins.legend.position = self.plugins.legend.position.secondary();
        }
        if overrides.tooltip_fonts {
            let font = self.plugins.legend.labels.font;
            self.plugins.tooltip = Some(TooltipOptions {
                body_font: font,
                title_font: font,
            });
        }
        if overrides.hide_scales {
            self.scales = None;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSeries>,
}

/// Everything the rendering capability needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: ChartPayload,
    pub options: ChartOptions,
}
