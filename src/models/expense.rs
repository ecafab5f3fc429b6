//! Modelo de Expense (gasto)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Gasto de un viaje - mapea a la tabla expenses
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub trip_id: i64,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub spent_on: NaiveDate,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub spent_on: NaiveDate,
    pub currency: String,
}
