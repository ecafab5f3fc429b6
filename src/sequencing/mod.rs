//! Secuencia de paradas
//!
//! Todas las entradas que mutan paradas (crear, editar, borrar, mover,
//! reordenar en lote) pasan por `Sequencer`.

pub mod engine;
pub mod gateway;
pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use engine::{Sequencer, SequencingError};
pub use gateway::{GatewayError, PositionAssignment, StopGateway, UnitOfWork};
pub use postgres::PgStopGateway;

/// Motor de secuencia usado por la aplicación
pub type StopSequencer = Sequencer<PgStopGateway>;
