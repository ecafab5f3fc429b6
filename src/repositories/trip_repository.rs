use sqlx::PgPool;

use crate::models::stop::StopFields;
use crate::models::trip::{NewTrip, Trip, TripChildCounts};
use crate::utils::errors::{not_found_error, AppError};

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta el viaje y sus paradas en una sola transacción.
    /// Las paradas quedan en el orden recibido (1..N).
    pub async fn create_with_stops(&self, trip: NewTrip, stops: Vec<StopFields>) -> Result<Trip, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (name, start_date, end_date, total_budget, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(trip.name)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.total_budget)
        .bind(trip.notes)
        .fetch_one(&mut *tx)
        .await?;

        for (index, stop) in stops.into_iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO stops (trip_id, destino, orden, fecha_llegada, fecha_salida, notas)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(created.id)
            .bind(stop.destination)
            .bind(index as i32 + 1)
            .bind(stop.arrival_date)
            .bind(stop.departure_date)
            .bind(stop.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_all(&self) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY start_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(trips)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(trip)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM trips WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    /// Error 404 si el viaje no existe
    pub async fn ensure_exists(&self, id: i64) -> Result<(), AppError> {
        if self.exists(id).await? {
            Ok(())
        } else {
            Err(not_found_error("Trip", id))
        }
    }

    /// Borra el viaje (en cascada) y devuelve cuántos registros dependientes
    /// tenía. `None` si el viaje no existe.
    pub async fn delete(&self, id: i64) -> Result<Option<TripChildCounts>, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let counts = sqlx::query_as::<_, TripChildCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM stops WHERE trip_id = $1) AS stops,
                (SELECT COUNT(*) FROM expenses WHERE trip_id = $1) AS expenses,
                (SELECT COUNT(*) FROM activities WHERE trip_id = $1) AS activities,
                (SELECT COUNT(*) FROM documents WHERE trip_id = $1) AS documents,
                (SELECT COUNT(*) FROM transports WHERE trip_id = $1) AS transports,
                (SELECT COUNT(*) FROM lodgings WHERE trip_id = $1) AS lodgings
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(counts))
    }
}
