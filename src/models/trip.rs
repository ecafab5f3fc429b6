//! Modelo de Trip (viaje)
//!
//! El viaje es el agregado principal: posee paradas, gastos, actividades,
//! documentos, transportes y alojamientos (borrado en cascada).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Viaje principal - mapea a la tabla trips
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: Decimal,
    pub spent_budget: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un viaje
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: Decimal,
    pub notes: Option<String>,
}

/// Estado temporal del viaje respecto a una fecha de referencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Upcoming,
    Active,
    Past,
}

impl TripStatus {
    pub fn classify(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if start > today {
            TripStatus::Upcoming
        } else if end >= today {
            TripStatus::Active
        } else {
            TripStatus::Past
        }
    }
}

impl Trip {
    pub fn status_on(&self, today: NaiveDate) -> TripStatus {
        TripStatus::classify(self.start_date, self.end_date, today)
    }

    /// Presupuesto restante (puede ser negativo si se excede)
    pub fn remaining_budget(&self) -> Decimal {
        self.total_budget - self.spent_budget
    }
}

/// Conteo de registros eliminados junto con un viaje
#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct TripChildCounts {
    pub stops: i64,
    pub expenses: i64,
    pub activities: i64,
    pub documents: i64,
    pub transports: i64,
    pub lodgings: i64,
}

impl TripChildCounts {
    pub fn total(&self) -> i64 {
        self.stops + self.expenses + self.activities + self.documents + self.transports + self.lodgings
    }
}
