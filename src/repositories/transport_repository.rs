use sqlx::PgPool;

use crate::models::transport::{NewTransport, Transport};
use crate::utils::errors::AppError;

pub struct TransportRepository {
    pool: PgPool,
}

impl TransportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip_id: i64, transport: NewTransport) -> Result<Transport, AppError> {
        let created = sqlx::query_as::<_, Transport>(
            r#"
            INSERT INTO transports (
                trip_id, kind, origin, destination, booking_code,
                departure_date, departure_time, arrival_date, arrival_time,
                carrier, service_number, terminal, gate, seat, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(transport.kind)
        .bind(transport.origin)
        .bind(transport.destination)
        .bind(transport.booking_code)
        .bind(transport.departure_date)
        .bind(transport.departure_time)
        .bind(transport.arrival_date)
        .bind(transport.arrival_time)
        .bind(transport.carrier)
        .bind(transport.service_number)
        .bind(transport.terminal)
        .bind(transport.gate)
        .bind(transport.seat)
        .bind(transport.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Transport>, AppError> {
        let transports = sqlx::query_as::<_, Transport>(
            r#"
            SELECT * FROM transports
            WHERE trip_id = $1
            ORDER BY departure_date, departure_time NULLS FIRST, id
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(transports)
    }

    pub async fn update(&self, id: i64, transport: NewTransport) -> Result<Option<Transport>, AppError> {
        let updated = sqlx::query_as::<_, Transport>(
            r#"
            UPDATE transports
            SET kind = $2, origin = $3, destination = $4, booking_code = $5,
                departure_date = $6, departure_time = $7, arrival_date = $8, arrival_time = $9,
                carrier = $10, service_number = $11, terminal = $12, gate = $13, seat = $14, notes = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transport.kind)
        .bind(transport.origin)
        .bind(transport.destination)
        .bind(transport.booking_code)
        .bind(transport.departure_date)
        .bind(transport.departure_time)
        .bind(transport.arrival_date)
        .bind(transport.arrival_time)
        .bind(transport.carrier)
        .bind(transport.service_number)
        .bind(transport.terminal)
        .bind(transport.gate)
        .bind(transport.seat)
        .bind(transport.notes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM transports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
