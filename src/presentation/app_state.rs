// Application state for HTTP handlers
use crate::application::controller::DashboardState;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    /// Read side of the session's dashboard state; the controller is the only writer
    pub dashboard: watch::Receiver<DashboardState>,
}

impl AppState {
    pub fn current(&self) -> DashboardState {
        self.dashboard.borrow().clone()
    }
}
