//! HTTP serving of the precomputed dashboard.
//!
//! Every request sees the same page: the pipeline runs once at startup and
//! the router state is immutable afterwards. One HTML route plus a static
//! mount for the intro image.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, extract::State, response::Html, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::PipelineError;

/// Shared server state: the fully rendered dashboard page.
#[derive(Clone)]
pub struct AppState {
    page: Arc<String>,
}

impl AppState {
    pub fn new(page: String) -> Self {
        Self {
            page: Arc::new(page),
        }
    }
}

/// Builds the router: `GET /` for the dashboard and, when an assets
/// directory exists, `/assets` for static files referenced by the page.
pub fn create_router(state: AppState, assets_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new().route("/", get(dashboard_handler));

    if let Some(dir) = assets_dir {
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// Binds and serves until the process is stopped.
pub async fn run_server(
    addr: &str,
    state: AppState,
    assets_dir: Option<PathBuf>,
) -> Result<(), PipelineError> {
    let router = create_router(state, assets_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PipelineError::Server(format!("bind failed: {e}")))?;

    tracing::info!("dashboard listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| PipelineError::Server(format!("server error: {e}")))
}
