// Render tree domain model produced by the layout composer
use super::chart::{ChartKind, ChartSpec, MetricKey};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Period-over-period annotation on a summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Delta {
    Available { text: String, sentiment: Sentiment },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub id: &'static str,
    pub title: &'static str,
    pub value: String,
    pub delta: Delta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartContent {
    Ready { spec: ChartSpec },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlot {
    pub key: MetricKey,
    pub title: &'static str,
    pub kind: ChartKind,
    /// Relative width within the row.
    pub flex: f32,
    pub content: ChartContent,
}

impl ChartSlot {
    pub fn spec(&self) -> Option<&ChartSpec> {
        match &self.content {
            ChartContent::Ready { spec } => Some(spec),
            ChartContent::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub slots: Vec<ChartSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub title: String,
    pub summary: Vec<SummaryCard>,
    pub rows: Vec<ChartRow>,
}

impl RenderTree {
    pub fn slots(&self) -> impl Iterator<Item = &ChartSlot> {
        self.rows.iter().flat_map(|row| row.slots.iter())
    }

    pub fn mark_unavailable(&mut self, key: MetricKey, reason: String) {
        for row in &mut self.rows {
            for slot in &mut row.slots {
                if slot.key == key {
                    slot.content = ChartContent::Unavailable {
                        reason: reason.clone(),
                    };
                }
            }
        }
    }
}
