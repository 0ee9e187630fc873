pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(page::handle_page))
        .route("/submit", post(page::handle_submit))
        .route("/cancel", post(page::handle_cancel))
        .route("/report", get(page::handle_report))
        .route("/health", get(health::health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
