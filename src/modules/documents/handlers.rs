//! Document endpoints. Every handler goes through `TenantDb`, so the
//! session it queries with is already bound to the schema of the tenant
//! resolved from the request host.

use axum::extract::Path;
use axum::{http::StatusCode, Json};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::db::crud::CrudRepository;
use crate::db::models::{Document, NewDocument, UpdateDocument};
use crate::db::repositories::DocumentRepository;
use crate::db::session::TenantDb;
use crate::error::{AppError, AppResult};

pub async fn list_documents(
    TenantDb { tenant, mut db }: TenantDb,
) -> AppResult<Json<Vec<Document>>> {
    let documents = DocumentRepository::list(&mut db).await?;
    debug!(tenant = %tenant.host, count = documents.len(), "Listed documents");
    Ok(Json(documents))
}

pub async fn get_document(
    TenantDb { mut db, .. }: TenantDb,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepository::get(&mut db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {id}")))?;
    Ok(Json(document))
}

pub async fn create_document(
    TenantDb { mut db, .. }: TenantDb,
    Json(payload): Json<NewDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    payload.validate()?;
    let document = DocumentRepository::create(&mut db, &payload).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn update_document(
    TenantDb { mut db, .. }: TenantDb,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    payload.validate()?;
    let existing = DocumentRepository::get(&mut db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {id}")))?;
    let document = DocumentRepository::update(&mut db, &existing, &payload).await?;
    Ok(Json(document))
}

pub async fn delete_document(
    TenantDb { mut db, .. }: TenantDb,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepository::remove(&mut db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {id}")))?;
    Ok(Json(document))
}
