pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::remodel::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/remodel/build", post(handlers::handle_build))
        .route("/api/v1/remodel/extract", post(handlers::handle_extract))
        .with_state(state)
}
