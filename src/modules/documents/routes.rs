use axum::{routing::get, Router};

use super::handlers::{
    create_document, delete_document, get_document, list_documents, update_document,
};
use crate::app_state::AppState;

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/{id}",
            get(get_document).put(update_document).delete(delete_document),
        )
}
