use chrono::Local;
use tracing::info;
use validator::Validate;

use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseListResponse, DEFAULT_CURRENCY};
use crate::dto::ApiResponse;
use crate::models::expense::{Expense, NewExpense};
use crate::repositories::expense_repository::ExpenseRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::expense_service::{total_amount, totals_by_category};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct ExpenseController {
    trips: TripRepository,
    expenses: ExpenseRepository,
}

impl ExpenseController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            expenses: ExpenseRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(&self, trip_id: i64, request: CreateExpenseRequest) -> Result<ApiResponse<Expense>, AppError> {
        request.validate()?;
        self.trips.ensure_exists(trip_id).await?;

        let expense = NewExpense {
            category: request.category.trim().to_string(),
            description: request.description.trim().to_string(),
            amount: request.amount,
            spent_on: request.spent_on.unwrap_or_else(|| Local::now().date_naive()),
            currency: request.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        };
        let created = self.expenses.create(trip_id, expense).await?;

        info!("💸 Gasto {} de {} {} registrado en viaje {}", created.id, created.amount, created.currency, trip_id);

        Ok(ApiResponse::success_with_message(created, "Gasto registrado exitosamente".to_string()))
    }

    pub async fn list(&self, trip_id: i64) -> Result<ExpenseListResponse, AppError> {
        self.trips.ensure_exists(trip_id).await?;
        let expenses = self.expenses.find_by_trip(trip_id).await?;

        Ok(ExpenseListResponse {
            total: total_amount(&expenses),
            by_category: totals_by_category(&expenses),
            expenses,
        })
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        let deleted = self.expenses.delete(id).await?.ok_or_else(|| not_found_error("Expense", id))?;
        info!("🗑️ Gasto {} eliminado del viaje {}", deleted.id, deleted.trip_id);
        Ok(ApiResponse::message("Gasto eliminado exitosamente".to_string()))
    }
}
