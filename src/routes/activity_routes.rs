use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::activity_controller::ActivityController;
use crate::dto::activity_dto::{ActivityStateResponse, CompleteActivityRequest, CreateActivityRequest};
use crate::dto::ApiResponse;
use crate::models::activity::Activity;
use crate::services::activity_service::{ActivityGroup, ActivityStats};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_activity_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/activities", post(create_activity).get(list_activities))
        .route("/activities/:id/complete", post(complete_activity))
        .route("/trips/:id/activities/stats", get(activity_stats))
        .route("/activities/:id", put(update_activity).delete(delete_activity))
}

async fn create_activity(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<Json<ApiResponse<Activity>>, AppError> {
    let controller = ActivityController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn list_activities(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<ActivityGroup>>, AppError> {
    let controller = ActivityController::new(&state);
    let response = controller.list(trip_id).await?;
    Ok(Json(response))
}

// Sin cuerpo se alterna el estado
async fn complete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Option<Json<CompleteActivityRequest>>,
) -> Result<Json<ApiResponse<ActivityStateResponse>>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let controller = ActivityController::new(&state);
    let response = controller.complete(id, request).await?;
    Ok(Json(response))
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ActivityController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<Json<ApiResponse<Activity>>, AppError> {
    let controller = ActivityController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn activity_stats(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<ActivityStats>, AppError> {
    let controller = ActivityController::new(&state);
    let response = controller.stats(trip_id).await?;
    Ok(Json(response))
}
