// HTTP request handlers
use crate::application::controller::{DashboardState, DashboardView};
use crate::application::diagnostics::Diagnostic;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum DashboardStatus<'a> {
    Loading,
    Ready { dashboard: &'a DashboardView },
    Failed { error: &'a Diagnostic },
}

impl<'a> From<&'a DashboardState> for DashboardStatus<'a> {
    fn from(state: &'a DashboardState) -> Self {
        match state {
            DashboardState::Loading => DashboardStatus::Loading,
            DashboardState::Ready(view) => DashboardStatus::Ready {
                dashboard: view.as_ref(),
            },
            DashboardState::Failed(diagnostic) => DashboardStatus::Failed { error: diagnostic },
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state as JSON
pub async fn dashboard_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let current = state.current();

    match json_response(&DashboardStatus::from(&current), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Dashboard page
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Response {
    match render_page(&state.current()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render dashboard page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
