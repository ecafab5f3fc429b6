use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::transport_controller::TransportController;
use crate::dto::transport_dto::{ConnectionQuery, CreateTransportRequest, ItineraryResponse};
use crate::dto::ApiResponse;
use crate::models::transport::Transport;
use crate::services::transport_service::TransportCheck;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transport_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/transports", post(create_transport).get(list_transports))
        .route("/trips/:id/transports/itinerary", get(transport_itinerary))
        .route("/trips/:id/transports/check", get(check_transports))
        .route("/transports/:id", put(update_transport).delete(delete_transport))
}

async fn create_transport(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateTransportRequest>,
) -> Result<Json<ApiResponse<Transport>>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn list_transports(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<Transport>>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.list(trip_id).await?;
    Ok(Json(response))
}

async fn delete_transport(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn update_transport(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateTransportRequest>,
) -> Result<Json<ApiResponse<Transport>>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn transport_itinerary(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.itinerary(trip_id, query.min_connection_minutes).await?;
    Ok(Json(response))
}

async fn check_transports(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<TransportCheck>, AppError> {
    let controller = TransportController::new(&state);
    let response = controller.check(trip_id, query.min_connection_minutes).await?;
    Ok(Json(response))
}
