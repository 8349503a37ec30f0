// Process-wide registry of the chart primitives the dashboard may render
use crate::application::chart_renderer::{ChartRenderer, RenderedChart};
use crate::domain::chart::{ChartKind, ChartSpec, MetricKey};
use crate::domain::error::RenderBindingError;
use crate::infrastructure::chartjs::ChartJsRenderer;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static REGISTRY: OnceLock<Arc<ChartRegistry>> = OnceLock::new();

/// Register the default primitives on first call and return the shared registry.
/// Later calls return the same instance; there is no teardown.
pub fn init() -> Arc<ChartRegistry> {
    REGISTRY
        .get_or_init(|| {
            let registry = ChartRegistry::with_defaults();
            tracing::info!(kinds = ?registry.kinds(), "chart primitives registered");
            Arc::new(registry)
        })
        .clone()
}

#[derive(Default)]
pub struct ChartRegistry {
    plugins: HashMap<ChartKind, Arc<dyn ChartRenderer>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let chartjs: Arc<dyn ChartRenderer> = Arc::new(ChartJsRenderer);
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            registry.register(kind, chartjs.clone());
        }
        registry
    }

    pub fn register(&mut self, kind: ChartKind, plugin: Arc<dyn ChartRenderer>) {
        if self.plugins.insert(kind, plugin).is_some() {
            tracing::debug!(kind = %kind, "replaced chart primitive");
        }
    }

    pub fn kinds(&self) -> Vec<ChartKind> {
        let mut kinds: Vec<_> = self.plugins.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl ChartRenderer for ChartRegistry {
    fn render(&self, key: MetricKey, spec: &ChartSpec) -> Result<RenderedChart, RenderBindingError> {
        self.plugins
            .get(&spec.kind)
            .ok_or(RenderBindingError::UnregisteredKind(spec.kind))?
            .render(key, spec)
    }
}
