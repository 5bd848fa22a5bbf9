//! HTTP surface of the service.

mod error;
mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/batch-analyze", post(handlers::batch_analyze))
        .route("/api/examples", get(handlers::examples))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
