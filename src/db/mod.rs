pub mod crud;
mod error;
pub mod models;
pub mod repositories;
pub mod session;

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;

use crate::config::DatabaseConfig;

pub use error::DatabaseError;
pub use models::*;

/// Initialize the database connection pool
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.unwrap_or(10))
        .min_connections(config.min_connections.unwrap_or(1))
        // Tenant sessions adjust search_path; scrub it before the
        // connection is handed to the next request.
        .after_release(|conn, _meta| {
            Box::pin(async move {
                conn.execute("RESET search_path").await?;
                Ok(true)
            })
        })
        .connect(&config.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
