use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::document_controller::DocumentController;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentListQuery};
use crate::dto::ApiResponse;
use crate::models::document::Document;
use crate::services::document_service::{DocumentCheck, DocumentStats, ExpiryReport};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/documents", post(create_document).get(list_documents))
        .route("/trips/:id/documents/stats", get(document_stats))
        .route("/trips/:id/documents/check", get(check_documents))
        .route("/documents/:id", put(update_document).delete(delete_document))
}

async fn create_document(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.create(trip_id, request).await?;
    Ok(Json(response))
}

async fn list_documents(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<ExpiryReport>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.list(trip_id, query.warning_days).await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn document_stats(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<DocumentStats>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.stats(trip_id, query.warning_days).await?;
    Ok(Json(response))
}

async fn check_documents(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<DocumentCheck>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.check(trip_id).await?;
    Ok(Json(response))
}
