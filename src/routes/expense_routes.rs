use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};

use crate::controllers::expense_controller::ExpenseController;
use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseListResponse};
use crate::dto::ApiResponse;
use crate::models::expense::Expense;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_expense_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/expenses", post(create_expense).get(list_expenses))
        .route("/expenses/:id", delete(delete_expense))
}

async fn create_expense(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<Json<ApiResponse<Expense>>, AppError> {
    let controller = ExpenseController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn list_expenses(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let controller = ExpenseController::new(&state);
    let response = controller.list(trip_id).await?;
    Ok(Json(response))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ExpenseController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
