//! Modelo de Stop (parada)
//!
//! Una parada es un destino dentro de un viaje con su propia posición
//! ordinal. Las columnas de la tabla están en español
//! (`destino`, `orden`, `fecha_llegada`, `fecha_salida`, `notas`).

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Columnas seleccionadas al leer paradas
pub const STOP_COLUMNS: &str = "id, trip_id, destino, orden, fecha_llegada, fecha_salida, notas";

/// Parada persistida - mapea a la tabla stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Stop {
    pub id: i64,
    pub trip_id: i64,
    #[sqlx(rename = "destino")]
    pub destination: String,
    #[sqlx(rename = "orden")]
    pub position: i32,
    #[sqlx(rename = "fecha_llegada")]
    pub arrival_date: NaiveDate,
    #[sqlx(rename = "fecha_salida")]
    pub departure_date: NaiveDate,
    #[sqlx(rename = "notas")]
    pub notes: Option<String>,
}

impl Stop {
    /// Noches que se pasan en la parada
    pub fn nights(&self) -> i64 {
        (self.departure_date - self.arrival_date).num_days().max(0)
    }
}

/// Campos editables de una parada
#[derive(Debug, Clone)]
pub struct StopFields {
    pub destination: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub notes: Option<String>,
}
