// Dashboard controller - One-shot load, validate, compose and render for a session
use crate::application::chart_renderer::{ChartRenderer, RenderedChart};
use crate::application::composer::LayoutComposer;
use crate::application::diagnostics::{Diagnostic, DiagnosticSink};
use crate::application::snapshot_source::SnapshotSource;
use crate::application::validation::parse_snapshot;
use crate::domain::dashboard::RenderTree;
use crate::domain::error::DashboardError;
use crate::domain::snapshot::AttendanceSnapshot;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Render tree plus the renderer output for every chart that could be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub tree: RenderTree,
    pub charts: Vec<RenderedChart>,
}

/// `Loading` is the only state with outgoing transitions.
#[derive(Debug, Clone)]
pub enum DashboardState {
    Loading,
    Ready(Arc<DashboardView>),
    Failed(Diagnostic),
}

impl DashboardState {
    pub fn phase(&self) -> &'static str {
        match self {
            DashboardState::Loading => "loading",
            DashboardState::Ready(_) => "ready",
            DashboardState::Failed(_) => "failed",
        }
    }
}

pub struct DashboardController {
    source: Arc<dyn SnapshotSource>,
    composer: LayoutComposer,
    renderer: Arc<dyn ChartRenderer>,
    sink: Arc<dyn DiagnosticSink>,
    state: watch::Sender<DashboardState>,
}

impl DashboardController {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        composer: LayoutComposer,
        renderer: Arc<dyn ChartRenderer>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> (Self, watch::Receiver<DashboardState>) {
        let (state, receiver) = watch::channel(DashboardState::Loading);
        let controller = Self {
            source,
            composer,
            renderer,
            sink,
            state,
        };
        (controller, receiver)
    }

    /// Run the session's single load. Consumes the controller, so there is no second load.
    pub async fn run(self) {
        tracing::info!(source = %self.source.describe(), "loading attendance snapshot");

        match self.load().await {
            Ok(snapshot) => {
                let view = self.present(&snapshot);
                tracing::info!(charts = view.charts.len(), "attendance dashboard ready");
                self.transition(DashboardState::Ready(Arc::new(view)));
            }
            Err(e) => {
                let diagnostic = Diagnostic::from(&e);
                self.sink.report(&diagnostic);
                self.transition(DashboardState::Failed(diagnostic));
            }
        }
    }

    async fn load(&self) -> Result<AttendanceSnapshot, DashboardError> {
        let payload = self.source.fetch().await?;
        Ok(parse_snapshot(&payload)?)
    }

    fn present(&self, snapshot: &AttendanceSnapshot) -> DashboardView {
        let mut tree = self.composer.compose(snapshot);

        let mut charts = Vec::new();
        let mut failed = Vec::new();
        for slot in tree.slots() {
            if let Some(spec) = slot.spec() {
                match self.renderer.render(slot.key, spec) {
                    Ok(chart) => charts.push(chart),
                    Err(e) => failed.push((slot.key, e)),
                }
            }
        }

        for (key, e) in failed {
            tracing::warn!(chart = key.as_str(), error = %e, "chart could not be rendered");
            tree.mark_unavailable(key, e.to_string());
        }

        DashboardView { tree, charts }
    }

    fn transition(&self, next: DashboardState) {
        let phase = next.phase();
        let applied = self.state.send_if_modified(|current| {
            if matches!(current, DashboardState::Loading) {
                *current = next;
                true
            } else {
                false
            }
        });

        if applied {
            tracing::info!(state = phase, "dashboard state changed");
        } else {
            tracing::warn!(state = phase, "ignoring transition out of a terminal state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::{minimal_snapshot_bytes, minimal_snapshot_json};
    use crate::application::format::DateFormat;
    use crate::application::transformer::SeriesTransformer;
    use crate::domain::chart::{ChartKind, ChartSpec, ChartStyle, MetricKey};
    use crate::domain::error::{ErrorKind, FetchError, RenderBindingError};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct FakeSource(Result<Vec<u8>, u16>);

    #[async_trait]
    impl SnapshotSource for FakeSource {
        fn describe(&self) -> String {
            "fake".to_string()
        }

        async fn fetch(&self) -> Result<Bytes, FetchError> {
            match &self.0 {
                Ok(payload) => Ok(Bytes::from(payload.clone())),
                Err(status) => Err(FetchError::Status {
                    url: "http://fake/attendance_dashboard.json".to_string(),
                    status: *status,
                }),
            }
        }
    }

    /// Renders everything except the kinds it was told to refuse.
    struct FakeRenderer(Vec<ChartKind>);

    impl ChartRenderer for FakeRenderer {
        fn render(&self, key: MetricKey, spec: &ChartSpec) -> Result<RenderedChart, RenderBindingError> {
            if self.0.contains(&spec.kind) {
                return Err(RenderBindingError::UnregisteredKind(spec.kind));
            }
            Ok(RenderedChart {
                key,
                kind: spec.kind,
                config: serde_json::to_value(spec).unwrap(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<Diagnostic>>);

    impl DiagnosticSink for RecordingSink {
        fn report(&self, diagnostic: &Diagnostic) {
            self.0.lock().unwrap().push(diagnostic.clone());
        }
    }

    fn controller(
        source: FakeSource,
        refuse: Vec<ChartKind>,
    ) -> (DashboardController, watch::Receiver<DashboardState>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let composer = LayoutComposer::new(
            "Attendance Dashboard".to_string(),
            SeriesTransformer::new(ChartStyle::default(), DateFormat::default()),
        );
        let (controller, state) = DashboardController::new(
            Arc::new(source),
            composer,
            Arc::new(FakeRenderer(refuse)),
            sink.clone(),
        );
        (controller, state, sink)
    }

    #[tokio::test]
    async fn test_minimal_snapshot_reaches_ready() {
        let (controller, state, sink) = controller(FakeSource(Ok(minimal_snapshot_bytes())), vec![]);
        assert_eq!(state.borrow().phase(), "loading");

        controller.run().await;

        let DashboardState::Ready(view) = state.borrow().clone() else {
            panic!("expected ready state");
        };
        assert_eq!(view.tree.summary.len(), 3);
        let kinds: Vec<_> = view.charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [ChartKind::Line, ChartKind::Bar, ChartKind::Pie]);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_section_fails_with_schema_error() {
        let mut value = minimal_snapshot_json();
        value.as_object_mut().unwrap().remove("site_distribution");
        let payload = serde_json::to_vec(&value).unwrap();
        let (controller, state, sink) = controller(FakeSource(Ok(payload)), vec![]);

        controller.run().await;

        let DashboardState::Failed(diagnostic) = state.borrow().clone() else {
            panic!("expected failed state");
        };
        assert_eq!(diagnostic.kind, ErrorKind::Schema);
        assert!(diagnostic.message.contains("site_distribution"));
        assert_eq!(sink.0.lock().unwrap().as_slice(), [diagnostic]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_terminal() {
        let (controller, state, sink) = controller(FakeSource(Err(503)), vec![]);

        controller.run().await;

        assert_eq!(state.borrow().phase(), "failed");
        let reported = sink.0.lock().unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].kind, ErrorKind::Fetch);
    }

    #[tokio::test]
    async fn test_unrenderable_chart_is_isolated() {
        let (controller, state, _) =
            controller(FakeSource(Ok(minimal_snapshot_bytes())), vec![ChartKind::Pie]);

        controller.run().await;

        let DashboardState::Ready(view) = state.borrow().clone() else {
            panic!("expected ready state");
        };
        let kinds: Vec<_> = view.charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [ChartKind::Line, ChartKind::Bar]);
        let pie = view
            .tree
            .slots()
            .find(|slot| slot.key == MetricKey::SiteDistribution)
            .unwrap();
        assert!(pie.spec().is_none());
    }

    #[test]
    fn test_terminal_state_has_no_outgoing_transition() {
        let (controller, state, _) = controller(FakeSource(Err(500)), vec![]);
        controller.transition(DashboardState::Failed(Diagnostic {
            kind: ErrorKind::Fetch,
            message: "first".to_string(),
        }));
        controller.transition(DashboardState::Loading);

        let DashboardState::Failed(diagnostic) = state.borrow().clone() else {
            panic!("expected failed state");
        };
        assert_eq!(diagnostic.message, "first");
    }
}
