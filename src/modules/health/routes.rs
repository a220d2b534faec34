use axum::{routing::get, Router};

use super::handlers::health_probe;
use crate::app_state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_probe))
}
