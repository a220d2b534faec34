use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

use crate::db::crud::Model;

/// A customer context routed by request host. Lives in the shared schema;
/// `schema_name` names the Postgres schema holding the tenant's private
/// tables.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub host: String,
    pub schema_name: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Model for Tenant {
    const TABLE: &'static str = "public.tenant";
}
