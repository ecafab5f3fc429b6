//! Modelo de Activity (actividad)

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

/// Destino usado cuando la actividad no pertenece a una parada concreta
pub const GENERAL_DESTINATION: &str = "general";

/// Actividad de un viaje - mapea a la tabla activities
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub trip_id: i64,
    pub destination: String,
    pub name: String,
    pub scheduled_on: NaiveDate,
    pub scheduled_at: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub destination: String,
    pub name: String,
    pub scheduled_on: NaiveDate,
    pub scheduled_at: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
}
