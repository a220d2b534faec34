use sqlx::PgConnection;

use crate::db::crud::Model;
use crate::db::models::Tenant;
use crate::db::DatabaseError;

pub struct TenantRepository;

impl TenantRepository {
    /// Shared-schema point lookup backing host-based tenant resolution.
    pub async fn get_by_host(
        db: &mut PgConnection,
        host: &str,
    ) -> Result<Option<Tenant>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE host = $1", Tenant::TABLE);
        let tenant = sqlx::query_as::<_, Tenant>(&sql)
            .bind(host)
            .fetch_optional(db)
            .await?;
        Ok(tenant)
    }
}
