use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{
    CreateTripRequest, ResortAllResponse, TripCreatedResponse, TripDeletedResponse, TripDetailResponse,
    TripSummaryResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route("/trips/:id", get(get_trip).delete(delete_trip))
        .route("/trips/:id/resort", post(resort_trip))
        .route("/admin/resort-all", post(resort_all_trips))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripCreatedResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripSummaryResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripDetailResponse>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TripDeletedResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn resort_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.resort(id).await?;
    Ok(Json(response))
}

async fn resort_all_trips(State(state): State<AppState>) -> Result<Json<ApiResponse<ResortAllResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.resort_all().await?;
    Ok(Json(response))
}
