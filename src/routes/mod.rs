pub mod health;
pub mod round;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/round", post(round::create_round))
        .route("/round/{round_id}", get(round::get_round))
        .route("/round/{round_id}/solution", get(round::get_solution))
}
