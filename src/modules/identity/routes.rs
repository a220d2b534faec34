use axum::{routing::post, Router};

use super::handlers::{login, register};
use crate::app_state::AppState;

pub fn identity_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
