//! Web form adapter.
//!
//! Axum server with an HTMX-enhanced single page mirroring the original app:
//! month multi-selection, per-month product rows and cash balances, and
//! aggregated results with a scatter chart and CSV download. Every submit
//! recomputes all selected months from scratch; no state outlives a request.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::ports::config_port::ConfigPort;

pub struct AppState {
    pub config: Arc<dyn ConfigPort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form_page))
        .route("/summarize", post(handlers::summarize))
        .route("/export.csv", post(handlers::export_csv))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
