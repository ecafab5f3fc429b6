//! Gateway de persistencia para la secuencia de paradas
//!
//! El motor de secuencia sólo habla con la base de datos a través de estos
//! traits: una unidad de trabajo transaccional (begin / flush / commit /
//! rollback) sobre las paradas de un viaje.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::stop::Stop;

/// Errores de la capa de persistencia durante la secuencia
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Position {position} already taken in trip {trip_id}")]
    PositionConflict { trip_id: i64, position: i32 },

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Nueva posición para una parada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAssignment {
    pub stop_id: i64,
    pub position: i32,
}

/// Origen de unidades de trabajo sobre la tabla de paradas
#[async_trait]
pub trait StopGateway: Send + Sync {
    type Unit: UnitOfWork;

    /// Abre una transacción nueva
    async fn begin(&self) -> Result<Self::Unit, GatewayError>;

    /// Viajes con más de una parada, ordenados por id
    async fn trips_with_multiple_stops(&self) -> Result<Vec<i64>, GatewayError>;
}

/// Transacción abierta. Nada es visible para otros lectores hasta `commit`;
/// si la unidad se descarta sin `commit` los cambios se pierden.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Serializa las operaciones de secuencia sobre un mismo viaje. Las
    /// lecturas posteriores ven lo que otras transacciones confirmaron
    /// mientras se esperaba el lock.
    async fn lock_trip(&mut self, trip_id: i64) -> Result<(), GatewayError>;

    async fn find_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError>;

    /// Paradas del viaje ordenadas por posición actual
    async fn trip_stops(&mut self, trip_id: i64) -> Result<Vec<Stop>, GatewayError>;

    /// Escribe posiciones sin confirmar (flush). La restricción
    /// `(trip_id, orden)` se comprueba contra el estado de la transacción.
    async fn assign_positions(
        &mut self,
        trip_id: i64,
        assignments: &[PositionAssignment],
    ) -> Result<(), GatewayError>;

    /// Borra la parada y devuelve la fila tal como estaba al borrarla
    async fn delete_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError>;

    /// Baja en uno todas las posiciones mayores que `removed_position`.
    /// Devuelve el número de paradas desplazadas.
    async fn close_gap(&mut self, trip_id: i64, removed_position: i32) -> Result<u64, GatewayError>;

    async fn commit(self) -> Result<(), GatewayError>;

    async fn rollback(self) -> Result<(), GatewayError>;
}
