use sqlx::PgPool;

use crate::models::document::{Document, NewDocument};
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip_id: i64, document: NewDocument) -> Result<Document, AppError> {
        let created = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (trip_id, kind, name, number, expires_on, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(document.kind)
        .bind(document.name)
        .bind(document.number)
        .bind(document.expires_on)
        .bind(document.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE trip_id = $1 ORDER BY expires_on NULLS LAST, id",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn update(&self, id: i64, document: NewDocument) -> Result<Option<Document>, AppError> {
        let updated = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET kind = $2, name = $3, number = $4, expires_on = $5, notes = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(document.kind)
        .bind(document.name)
        .bind(document.number)
        .bind(document.expires_on)
        .bind(document.notes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
