//! Request-lifetime database sessions with per-tenant schema routing.
//!
//! A tenant's tables live in its own Postgres schema. Opening a session with
//! a tenant schema rewrites the connection's search path so unqualified
//! table references resolve against that schema, with shared tables in
//! `public` still reachable. The pool resets the search path when the
//! connection is released (see `init_pool`), so scoping never leaks across
//! requests.

use std::ops::{Deref, DerefMut};

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::app_state::AppState;
use crate::db::repositories::TenantRepository;
use crate::db::{DatabaseError, Tenant};
use crate::error::AppError;

/// A pooled connection, optionally bound to a tenant schema.
///
/// The connection returns to the pool when this guard drops, on every exit
/// path including cancellation of the surrounding request task.
pub struct ScopedDb {
    conn: PoolConnection<Postgres>,
}

impl ScopedDb {
    /// Open a session. With `Some(schema)` the tenant namespace is remapped
    /// to that schema; with `None` default/shared resolution applies.
    pub async fn open(pool: &PgPool, tenant_schema: Option<&str>) -> Result<Self, DatabaseError> {
        let mut conn = pool.acquire().await.map_err(DatabaseError::from)?;
        if let Some(schema) = tenant_schema {
            let stmt = format!("SET search_path TO {}, public", quote_ident(schema));
            sqlx::query(&stmt).execute(&mut *conn).await?;
        }
        Ok(Self { conn })
    }
}

impl Deref for ScopedDb {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedDb {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

/// Resolve the tenant owning `host`, which may carry a `:port` suffix.
///
/// The lookup runs against the shared schema. An unknown host fails with
/// `DatabaseError::TenantNotFound`, which the error boundary maps to 404
/// rather than 500.
pub async fn resolve_tenant(pool: &PgPool, host: &str) -> Result<Tenant, DatabaseError> {
    let host = strip_port(host);
    let mut db = ScopedDb::open(pool, None).await?;
    TenantRepository::get_by_host(&mut db, host)
        .await?
        .ok_or_else(|| DatabaseError::TenantNotFound {
            host: host.to_string(),
        })
}

/// Session against the shared schema, for shared entities
/// (tenant, account_user).
pub struct SharedDb(pub ScopedDb);

impl FromRequestParts<AppState> for SharedDb {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(ScopedDb::open(&state.db, None).await?))
    }
}

/// Session bound to the schema of the tenant resolved from the request's
/// host header.
pub struct TenantDb {
    pub tenant: Tenant,
    pub db: ScopedDb,
}

impl FromRequestParts<AppState> for TenantDb {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing host header".to_string()))?;

        let tenant = resolve_tenant(&state.db, host).await?;
        let db = ScopedDb::open(&state.db, Some(&tenant.schema_name)).await?;
        Ok(Self { tenant, db })
    }
}

fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_port_removes_port_suffix() {
        assert_eq!(strip_port("acme.example.com:8000"), "acme.example.com");
        assert_eq!(strip_port("localhost:80"), "localhost");
    }

    #[test]
    fn strip_port_leaves_bare_hosts_alone() {
        assert_eq!(strip_port("acme.example.com"), "acme.example.com");
        assert_eq!(strip_port(""), "");
    }

    #[test]
    fn quote_ident_wraps_in_double_quotes() {
        assert_eq!(quote_ident("tenant_acme"), "\"tenant_acme\"");
    }

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("evil\"schema"), "\"evil\"\"schema\"");
    }

    #[test]
    fn tenant_not_found_message_names_the_host() {
        let err = DatabaseError::TenantNotFound {
            host: "unknown.example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tenant not found for host: unknown.example.com"
        );
    }
}
