//! Implementación PostgreSQL del gateway de paradas

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::gateway::{GatewayError, PositionAssignment, StopGateway, UnitOfWork};
use crate::models::stop::{Stop, STOP_COLUMNS};

#[derive(Clone)]
pub struct PgStopGateway {
    pool: PgPool,
}

impl PgStopGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StopGateway for PgStopGateway {
    type Unit = PgUnitOfWork;

    async fn begin(&self) -> Result<PgUnitOfWork, GatewayError> {
        let tx = self.pool.begin().await?;
        Ok(PgUnitOfWork { tx })
    }

    async fn trips_with_multiple_stops(&self) -> Result<Vec<i64>, GatewayError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT trip_id
            FROM stops
            GROUP BY trip_id
            HAVING COUNT(*) > 1
            ORDER BY trip_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

/// Transacción de PostgreSQL. Si se descarta sin commit, sqlx hace rollback.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn lock_trip(&mut self, trip_id: i64) -> Result<(), GatewayError> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(trip_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn find_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError> {
        let stop = sqlx::query_as::<_, Stop>(&format!("SELECT {STOP_COLUMNS} FROM stops WHERE id = $1"))
            .bind(stop_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(stop)
    }

    async fn trip_stops(&mut self, trip_id: i64) -> Result<Vec<Stop>, GatewayError> {
        let stops = sqlx::query_as::<_, Stop>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops WHERE trip_id = $1 ORDER BY orden, id"
        ))
        .bind(trip_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(stops)
    }

    async fn assign_positions(
        &mut self,
        trip_id: i64,
        assignments: &[PositionAssignment],
    ) -> Result<(), GatewayError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = assignments.iter().map(|a| a.stop_id).collect();
        let positions: Vec<i32> = assignments.iter().map(|a| a.position).collect();

        let result = sqlx::query(
            r#"
            UPDATE stops AS s
            SET orden = v.orden
            FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, orden)
            WHERE s.id = v.id AND s.trip_id = $3
            "#,
        )
        .bind(ids)
        .bind(positions)
        .bind(trip_id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() != assignments.len() as u64 {
            return Err(GatewayError::Backend(format!(
                "expected to update {} stops of trip {}, updated {}",
                assignments.len(),
                trip_id,
                result.rows_affected()
            )));
        }

        Ok(())
    }

    async fn delete_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError> {
        let deleted = sqlx::query_as::<_, Stop>(&format!("DELETE FROM stops WHERE id = $1 RETURNING {STOP_COLUMNS}"))
            .bind(stop_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(deleted)
    }

    async fn close_gap(&mut self, trip_id: i64, removed_position: i32) -> Result<u64, GatewayError> {
        let result = sqlx::query("UPDATE stops SET orden = orden - 1 WHERE trip_id = $1 AND orden > $2")
            .bind(trip_id)
            .bind(removed_position)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), GatewayError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), GatewayError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
