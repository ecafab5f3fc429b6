use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};

use crate::controllers::stop_controller::StopController;
use crate::dto::stop_dto::{ReorderStopRequest, StopRequest, StopResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stop_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/stops", post(create_stop))
        .route("/stops/:id", put(update_stop).delete(delete_stop))
        .route("/stops/:id/reorder", post(reorder_stop))
}

async fn create_stop(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<StopRequest>,
) -> Result<Json<ApiResponse<StopResponse>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn update_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StopRequest>,
) -> Result<Json<ApiResponse<StopResponse>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

// Un cuerpo ausente o ilegible equivale a no enviar `target_position`
async fn reorder_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Option<Json<ReorderStopRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = request.map_or(ReorderStopRequest { target_position: None }, |Json(r)| r);
    let controller = StopController::new(&state);
    let response = controller.reorder(id, request).await?;
    Ok(Json(response))
}
