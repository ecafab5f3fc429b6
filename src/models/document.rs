//! Modelo de Document (documento de viaje: pasaporte, visa, seguro...)

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub trip_id: i64,
    pub kind: String,
    pub name: String,
    pub number: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub kind: String,
    pub name: String,
    pub number: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub notes: Option<String>,
}
