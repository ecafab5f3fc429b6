use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::lodging_controller::LodgingController;
use crate::dto::lodging_dto::{CreateLodgingRequest, LodgingListResponse};
use crate::dto::ApiResponse;
use crate::models::lodging::Lodging;
use crate::services::lodging_service::{LodgingCheck, LodgingCoverage};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lodging_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/lodgings", post(create_lodging).get(list_lodgings))
        .route("/trips/:id/lodgings/coverage", get(lodging_coverage))
        .route("/trips/:id/lodgings/check", get(check_lodgings))
        .route("/lodgings/:id", put(update_lodging).delete(delete_lodging))
}

async fn create_lodging(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateLodgingRequest>,
) -> Result<Json<ApiResponse<Lodging>>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn list_lodgings(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<LodgingListResponse>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.list(trip_id).await?;
    Ok(Json(response))
}

async fn delete_lodging(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn update_lodging(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateLodgingRequest>,
) -> Result<Json<ApiResponse<Lodging>>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn lodging_coverage(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<LodgingCoverage>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.coverage(trip_id).await?;
    Ok(Json(response))
}

async fn check_lodgings(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<LodgingCheck>, AppError> {
    let controller = LodgingController::new(&state);
    let response = controller.check(trip_id).await?;
    Ok(Json(response))
}
