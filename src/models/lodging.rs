//! Modelo de Lodging (alojamiento)

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

/// Alojamiento de un viaje - mapea a la tabla lodgings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Lodging {
    pub id: i64,
    pub trip_id: i64,
    pub destination: String,
    pub name: String,
    pub address: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_date: NaiveDate,
    pub check_out_time: NaiveTime,
    pub breakfast_included: bool,
    pub confirmation_number: Option<String>,
    pub pin_code: Option<String>,
    pub check_in_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewLodging {
    pub destination: String,
    pub name: String,
    pub address: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_date: NaiveDate,
    pub check_out_time: NaiveTime,
    pub breakfast_included: bool,
    pub confirmation_number: Option<String>,
    pub pin_code: Option<String>,
    pub check_in_number: Option<String>,
}

impl Lodging {
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}
