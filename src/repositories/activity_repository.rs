use sqlx::PgPool;

use crate::models::activity::{Activity, NewActivity};
use crate::utils::errors::AppError;

pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip_id: i64, activity: NewActivity) -> Result<Activity, AppError> {
        let created = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (trip_id, destination, name, scheduled_on, scheduled_at, location, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(activity.destination)
        .bind(activity.name)
        .bind(activity.scheduled_on)
        .bind(activity.scheduled_at)
        .bind(activity.location)
        .bind(activity.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE trip_id = $1
            ORDER BY scheduled_on, scheduled_at NULLS FIRST, id
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }

    /// Reemplaza los datos editables; `completed` no cambia
    pub async fn update(&self, id: i64, activity: NewActivity) -> Result<Option<Activity>, AppError> {
        let updated = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET destination = $2, name = $3, scheduled_on = $4, scheduled_at = $5,
                location = $6, description = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(activity.destination)
        .bind(activity.name)
        .bind(activity.scheduled_on)
        .bind(activity.scheduled_at)
        .bind(activity.location)
        .bind(activity.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Fija `completed`, o lo alterna si es `None`
    pub async fn set_completed(&self, id: i64, completed: Option<bool>) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            "UPDATE activities SET completed = COALESCE($2, NOT completed) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;
        Ok(activity)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
