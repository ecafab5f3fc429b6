use sqlx::{PgConnection, PgPool};

use crate::models::expense::{Expense, NewExpense};
use crate::utils::errors::AppError;

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta el gasto y recalcula `spent_budget` del viaje en la misma transacción
    pub async fn create(&self, trip_id: i64, expense: NewExpense) -> Result<Expense, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (trip_id, category, description, amount, spent_on, currency)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(expense.category)
        .bind(expense.description)
        .bind(expense.amount)
        .bind(expense.spent_on)
        .bind(expense.currency)
        .fetch_one(&mut *tx)
        .await?;

        refresh_spent_budget(&mut tx, trip_id).await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Gastos del viaje, los más recientes primero
    pub async fn find_by_trip(&self, trip_id: i64) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE trip_id = $1 ORDER BY spent_on DESC, id DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn delete(&self, id: i64) -> Result<Option<Expense>, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Expense>("DELETE FROM expenses WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(expense) = &deleted {
            refresh_spent_budget(&mut tx, expense.trip_id).await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}

async fn refresh_spent_budget(conn: &mut PgConnection, trip_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE trips
        SET spent_budget = (SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE trip_id = $1)
        WHERE id = $1
        "#,
    )
    .bind(trip_id)
    .execute(conn)
    .await?;
    Ok(())
}
