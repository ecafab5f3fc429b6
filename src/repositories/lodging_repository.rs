use sqlx::PgPool;

use crate::models::lodging::{Lodging, NewLodging};
use crate::utils::errors::AppError;

pub struct LodgingRepository {
    pool: PgPool,
}

impl LodgingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip_id: i64, lodging: NewLodging) -> Result<Lodging, AppError> {
        let created = sqlx::query_as::<_, Lodging>(
            r#"
            INSERT INTO lodgings (
                trip_id, destination, name, address,
                check_in_date, check_in_time, check_out_date, check_out_time,
                breakfast_included, confirmation_number, pin_code, check_in_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(lodging.destination)
        .bind(lodging.name)
        .bind(lodging.address)
        .bind(lodging.check_in_date)
        .bind(lodging.check_in_time)
        .bind(lodging.check_out_date)
        .bind(lodging.check_out_time)
        .bind(lodging.breakfast_included)
        .bind(lodging.confirmation_number)
        .bind(lodging.pin_code)
        .bind(lodging.check_in_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Lodging>, AppError> {
        let lodgings = sqlx::query_as::<_, Lodging>(
            "SELECT * FROM lodgings WHERE trip_id = $1 ORDER BY check_in_date, check_in_time, id",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lodgings)
    }

    pub async fn update(&self, id: i64, lodging: NewLodging) -> Result<Option<Lodging>, AppError> {
        let updated = sqlx::query_as::<_, Lodging>(
            r#"
            UPDATE lodgings
            SET destination = $2, name = $3, address = $4,
                check_in_date = $5, check_in_time = $6, check_out_date = $7, check_out_time = $8,
                breakfast_included = $9, confirmation_number = $10, pin_code = $11, check_in_number = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(lodging.destination)
        .bind(lodging.name)
        .bind(lodging.address)
        .bind(lodging.check_in_date)
        .bind(lodging.check_in_time)
        .bind(lodging.check_out_date)
        .bind(lodging.check_out_time)
        .bind(lodging.breakfast_included)
        .bind(lodging.confirmation_number)
        .bind(lodging.pin_code)
        .bind(lodging.check_in_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM lodgings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
