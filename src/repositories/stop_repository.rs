use sqlx::PgPool;

use crate::models::stop::{Stop, StopFields, STOP_COLUMNS};
use crate::utils::errors::AppError;

/// Lecturas y escrituras de campos de paradas.
/// Las posiciones solo las cambia el motor de secuencia.
pub struct StopRepository {
    pool: PgPool,
}

impl StopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta la parada al final del viaje (`MAX(orden) + 1`). El lock
    /// consultivo del viaje evita que dos altas simultáneas tomen la misma
    /// posición.
    pub async fn create(&self, trip_id: i64, fields: StopFields) -> Result<Stop, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(trip_id)
            .execute(&mut *tx)
            .await?;

        let stop = sqlx::query_as::<_, Stop>(&format!(
            r#"
            INSERT INTO stops (trip_id, destino, orden, fecha_llegada, fecha_salida, notas)
            VALUES (
                $1, $2,
                (SELECT COALESCE(MAX(orden), 0) + 1 FROM stops WHERE trip_id = $1),
                $3, $4, $5
            )
            RETURNING {STOP_COLUMNS}
            "#
        ))
        .bind(trip_id)
        .bind(fields.destination)
        .bind(fields.arrival_date)
        .bind(fields.departure_date)
        .bind(fields.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stop)
    }

    pub async fn update(&self, id: i64, fields: StopFields) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>(&format!(
            r#"
            UPDATE stops
            SET destino = $2, fecha_llegada = $3, fecha_salida = $4, notas = $5
            WHERE id = $1
            RETURNING {STOP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.destination)
        .bind(fields.arrival_date)
        .bind(fields.departure_date)
        .bind(fields.notes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(stop)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>(&format!("SELECT {STOP_COLUMNS} FROM stops WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stop)
    }

    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Stop>, AppError> {
        let stops = sqlx::query_as::<_, Stop>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops WHERE trip_id = $1 ORDER BY orden, id"
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stops)
    }

    /// Paradas de varios viajes, agrupables por `trip_id` y ordenadas por posición
    pub async fn find_by_trips(&self, trip_ids: &[i64]) -> Result<Vec<Stop>, AppError> {
        if trip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let stops = sqlx::query_as::<_, Stop>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops WHERE trip_id = ANY($1) ORDER BY trip_id, orden, id"
        ))
        .bind(trip_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(stops)
    }
}
