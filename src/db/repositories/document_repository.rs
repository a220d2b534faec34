use sqlx::PgConnection;

use crate::db::crud::{CrudRepository, Model};
use crate::db::models::{Document, NewDocument, UpdateDocument};
use crate::db::DatabaseError;

pub struct DocumentRepository;

impl DocumentRepository {
    /// All documents visible to the session's tenant schema, newest first.
    pub async fn list(db: &mut PgConnection) -> Result<Vec<Document>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", Document::TABLE);
        let documents = sqlx::query_as::<_, Document>(&sql).fetch_all(db).await?;
        Ok(documents)
    }
}

impl CrudRepository for DocumentRepository {
    type Model = Document;
    type Create = NewDocument;
    type Update = UpdateDocument;

    async fn create(db: &mut PgConnection, input: &NewDocument) -> Result<Document, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (title, description) VALUES ($1, $2) RETURNING *",
            Document::TABLE
        );
        let document = sqlx::query_as::<_, Document>(&sql)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .fetch_one(db)
            .await?;
        Ok(document)
    }

    async fn update(
        db: &mut PgConnection,
        existing: &Document,
        input: &UpdateDocument,
    ) -> Result<Document, DatabaseError> {
        let sql = format!(
            "UPDATE {} \
             SET title = COALESCE($1, title), \
                 description = COALESCE($2, description), \
                 updated_at = now() \
             WHERE id = $3 \
             RETURNING *",
            Document::TABLE
        );
        let document = sqlx::query_as::<_, Document>(&sql)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(existing.id)
            .fetch_one(db)
            .await?;
        Ok(document)
    }
}
