pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/course-outline",
            post(handlers::handle_generate_outline),
        )
        // Route name used by the marketing site's client
        .route(
            "/api/course-generator",
            post(handlers::handle_generate_outline),
        )
        .with_state(state)
}
