// Rendering capability - turns a chart spec into a renderer configuration
use crate::domain::chart::{ChartKind, ChartSpec, MetricKey};
use crate::domain::error::RenderBindingError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub key: MetricKey,
    pub kind: ChartKind,
    pub config: serde_json::Value,
}

pub trait ChartRenderer: Send + Sync {
    fn render(&self, key: MetricKey, spec: &ChartSpec) -> Result<RenderedChart, RenderBindingError>;
}
