// Layout composer - Pure mapping from a validated snapshot to the dashboard render tree
use crate::application::format::{format_count, format_percent, format_signed};
use crate::application::transformer::SeriesTransformer;
use crate::domain::chart::{ChartBinding, ChartKind, LegendOverride, MetricKey, OptionOverrides, Section};
use crate::domain::dashboard::{ChartContent, ChartRow, ChartSlot, Delta, RenderTree, Sentiment, SummaryCard};
use crate::domain::snapshot::{AttendanceSnapshot, Summary};

/// Rows in display order.
const SECTIONS: [Section; 2] = [Section::Trend, Section::Sites];

/// Which snapshot slice renders as which chart. New metrics are added here.
pub static BINDINGS: [ChartBinding; 3] = [
    ChartBinding {
        key: MetricKey::DailyTrends,
        kind: ChartKind::Line,
        title: "Daily Trends",
        section: Section::Trend,
        flex: 1.0,
        overrides: OptionOverrides {
            legend: LegendOverride::Inherit,
            tooltip_fonts: true,
            hide_scales: false,
        },
    },
    ChartBinding {
        key: MetricKey::SiteAttendance,
        kind: ChartKind::Bar,
        title: "Site Attendance",
        section: Section::Sites,
        flex: 1.0,
        overrides: OptionOverrides {
            legend: LegendOverride::Inherit,
            tooltip_fonts: false,
            hide_scales: false,
        },
    },
    // Pie legends crowd the slices at the default edge, and need the wider column.
    ChartBinding {
        key: MetricKey::SiteDistribution,
        kind: ChartKind::Pie,
        title: "Site Distribution",
        section: Section::Sites,
        flex: 1.3,
        overrides: OptionOverrides {
            legend: LegendOverride::Secondary,
            tooltip_fonts: false,
            hide_scales: true,
        },
    },
];

#[derive(Debug, Clone)]
pub struct LayoutComposer {
    title: String,
    transformer: SeriesTransformer,
    bindings: &'static [ChartBinding],
}

impl LayoutComposer {
    pub fn new(title: String, transformer: SeriesTransformer) -> Self {
        Self {
            title,
            transformer,
            bindings: &BINDINGS,
        }
    }

    pub fn compose(&self, snapshot: &AttendanceSnapshot) -> RenderTree {
        let rows = SECTIONS
            .iter()
            .map(|section| ChartRow {
                slots: self
                    .bindings
                    .iter()
                    .filter(|binding| binding.section == *section)
                    .map(|binding| self.chart_slot(snapshot, binding))
                    .collect(),
            })
            .filter(|row| !row.slots.is_empty())
            .collect();

        RenderTree {
            title: self.title.clone(),
            summary: summary_cards(&snapshot.summary),
            rows,
        }
    }

    fn chart_slot(&self, snapshot: &AttendanceSnapshot, binding: &ChartBinding) -> ChartSlot {
        let content = match self.transformer.chart_spec(snapshot, binding) {
            Ok(spec) => ChartContent::Ready { spec },
            Err(e) => {
                tracing::warn!(chart = binding.key.as_str(), error = %e, "chart section unavailable");
                ChartContent::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        ChartSlot {
            key: binding.key,
            title: binding.title,
            kind: binding.kind,
            flex: binding.flex,
            content,
        }
    }
}

/// Total workforce, absence rate, on-site workforce, in that order.
fn summary_cards(summary: &Summary) -> Vec<SummaryCard> {
    let current = &summary.current;
    let previous = summary.previous.as_ref();

    vec![
        SummaryCard {
            id: "total_workforce",
            title: "Total Workforce",
            value: format_count(current.total_enrolled),
            delta: previous.map_or(Delta::Unavailable, |p| {
                count_delta(current.total_enrolled, p.total_enrolled)
            }),
        },
        SummaryCard {
            id: "absence_rate",
            title: "Absence Rate",
            value: format_percent(current.absence_rate),
            delta: previous.map_or(Delta::Unavailable, |p| {
                rate_delta(current.absence_rate, p.absence_rate)
            }),
        },
        SummaryCard {
            id: "on_site_workforce",
            title: "On-Site Workforce",
            value: format_count(current.total_present),
            delta: previous.map_or(Delta::Unavailable, |p| {
                count_delta(current.total_present, p.total_present)
            }),
        },
    ]
}

fn count_delta(current: u64, previous: u64) -> Delta {
    if previous == 0 {
        return Delta::Unavailable;
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    Delta::Available {
        text: format!("{} vs previous", format_signed(change, "%")),
        sentiment: sentiment(change, true),
    }
}

fn rate_delta(current: f64, previous: f64) -> Delta {
    let change = current - previous;
    Delta::Available {
        text: format!("{} vs previous", format_signed(change, " pts")),
        sentiment: sentiment(change, false),
    }
}

fn sentiment(change: f64, higher_is_better: bool) -> Sentiment {
    let rounded = (change * 10.0).round();
    if rounded == 0.0 {
        Sentiment::Neutral
    } else if (rounded > 0.0) == higher_is_better {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}
