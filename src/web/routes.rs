use super::handlers::{about_handler, root_handler};
use crate::{auth::guest_handler, AppState};
use axum::{routing::any, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/guest", any(guest_handler))
        // GET renders the page; POST adds the generated guest link
        .route("/about", any(about_handler))
        .route("/", any(root_handler))
        .fallback(root_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
