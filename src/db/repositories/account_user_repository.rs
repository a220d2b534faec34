use sqlx::PgConnection;

use crate::db::crud::{CrudRepository, Model};
use crate::db::models::{AccountUser, NewAccountUser, UpdateAccountUser};
use crate::db::DatabaseError;

pub struct AccountUserRepository;

impl AccountUserRepository {
    /// Emails are stored and matched lowercased.
    pub async fn get_by_email(
        db: &mut PgConnection,
        email: &str,
    ) -> Result<Option<AccountUser>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE email = $1", AccountUser::TABLE);
        let account = sqlx::query_as::<_, AccountUser>(&sql)
            .bind(email.to_lowercase())
            .fetch_optional(db)
            .await?;
        Ok(account)
    }
}

impl CrudRepository for AccountUserRepository {
    type Model = AccountUser;
    type Create = NewAccountUser;
    type Update = UpdateAccountUser;

    async fn create(
        db: &mut PgConnection,
        input: &NewAccountUser,
    ) -> Result<AccountUser, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (name, email, username, password_hash, country_code, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
            AccountUser::TABLE
        );
        let account = sqlx::query_as::<_, AccountUser>(&sql)
            .bind(&input.name)
            .bind(input.email.to_lowercase())
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.country_code)
            .bind(&input.phone)
            .fetch_one(db)
            .await?;
        Ok(account)
    }

    async fn update(
        db: &mut PgConnection,
        existing: &AccountUser,
        input: &UpdateAccountUser,
    ) -> Result<AccountUser, DatabaseError> {
        let sql = format!(
            "UPDATE {} \
             SET name = COALESCE($1, name), \
                 password_hash = COALESCE($2, password_hash), \
                 is_active = COALESCE($3, is_active), \
                 updated_at = now() \
             WHERE id = $4 \
             RETURNING *",
            AccountUser::TABLE
        );
        let account = sqlx::query_as::<_, AccountUser>(&sql)
            .bind(input.name.as_deref())
            .bind(input.password_hash.as_deref())
            .bind(input.is_active)
            .bind(existing.id)
            .fetch_one(db)
            .await?;
        Ok(account)
    }
}
