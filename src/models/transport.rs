//! Modelo de Transport (vuelo, tren, bus...)

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

pub const DEFAULT_TRANSPORT_KIND: &str = "flight";

/// Transporte de un viaje - mapea a la tabla transports
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transport {
    pub id: i64,
    pub trip_id: i64,
    pub kind: String,
    pub origin: String,
    pub destination: String,
    pub booking_code: Option<String>,
    pub departure_date: NaiveDate,
    pub departure_time: Option<NaiveTime>,
    pub arrival_date: NaiveDate,
    pub arrival_time: Option<NaiveTime>,
    pub carrier: Option<String>,
    pub service_number: Option<String>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub seat: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTransport {
    pub kind: String,
    pub origin: String,
    pub destination: String,
    pub booking_code: Option<String>,
    pub departure_date: NaiveDate,
    pub departure_time: Option<NaiveTime>,
    pub arrival_date: NaiveDate,
    pub arrival_time: Option<NaiveTime>,
    pub carrier: Option<String>,
    pub service_number: Option<String>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub seat: Option<String>,
    pub notes: Option<String>,
}
