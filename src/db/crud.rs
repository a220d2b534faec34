//! Generic CRUD base over id-keyed entities.
//!
//! `get` and `remove` are provided generically; `create` and `update` are
//! entity specific because their column lists are. Every operation issues a
//! single autocommitted statement and uses `RETURNING *` so the caller gets
//! the row as the store persisted it, generated fields included.

use std::future::Future;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use crate::db::DatabaseError;

/// Row type backed by a single table addressable by a `id UUID` primary key.
pub trait Model: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Table name as issued in SQL. Tenant-scoped tables stay unqualified so
    /// the session's search path decides which schema they resolve to;
    /// shared tables are pinned to `public`.
    const TABLE: &'static str;
}

pub trait CrudRepository {
    type Model: Model;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Point lookup by primary key. Absence is `None`, not an error.
    fn get(
        db: &mut PgConnection,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Self::Model>, DatabaseError>> + Send {
        async move {
            let sql = format!("SELECT * FROM {} WHERE id = $1", Self::Model::TABLE);
            let row = sqlx::query_as::<_, Self::Model>(&sql)
                .bind(id)
                .fetch_optional(db)
                .await?;
            Ok(row)
        }
    }

    /// Persist a new row built from validated input.
    fn create(
        db: &mut PgConnection,
        input: &Self::Create,
    ) -> impl Future<Output = Result<Self::Model, DatabaseError>> + Send;

    /// Apply the fields present in a partial input onto an existing row.
    fn update(
        db: &mut PgConnection,
        existing: &Self::Model,
        input: &Self::Update,
    ) -> impl Future<Output = Result<Self::Model, DatabaseError>> + Send;

    /// Delete by primary key, returning the removed row, or `None` if it
    /// never existed.
    fn remove(
        db: &mut PgConnection,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Self::Model>, DatabaseError>> + Send {
        async move {
            let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING *", Self::Model::TABLE);
            let row = sqlx::query_as::<_, Self::Model>(&sql)
                .bind(id)
                .fetch_optional(db)
                .await?;
            Ok(row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{AccountUser, Document, Tenant};

    // Shared tables must be pinned to public; tenant tables must stay
    // unqualified so the scoped session's search path routes them.
    #[test]
    fn shared_tables_are_schema_qualified() {
        assert!(Tenant::TABLE.starts_with("public."));
        assert!(AccountUser::TABLE.starts_with("public."));
    }

    #[test]
    fn tenant_tables_are_unqualified() {
        assert!(!Document::TABLE.contains('.'));
    }
}
