use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::status))
        .route("/session", post(handlers::create_session))
        .route("/chat", post(handlers::chat))
        .route("/history/:session_id", get(handlers::get_history))
        .route("/history/:session_id", delete(handlers::clear_history))
        .route("/ingest", post(handlers::ingest))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use kiosk_core::{Error, Result};
}
