use chrono::Local;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::document_dto::CreateDocumentRequest;
use crate::dto::ApiResponse;
use crate::models::document::{Document, NewDocument};
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::document_service::{DocumentCheck, DocumentStats, ExpiryReport};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::non_empty;

pub struct DocumentController {
    trips: TripRepository,
    documents: DocumentRepository,
    default_warning_days: i64,
}

impl DocumentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            documents: DocumentRepository::new(state.pool.clone()),
            default_warning_days: state.config.document_warning_days,
        }
    }

    pub async fn create(&self, trip_id: i64, request: CreateDocumentRequest) -> Result<ApiResponse<Document>, AppError> {
        let document = new_document(request)?;
        self.trips.ensure_exists(trip_id).await?;

        let created = self.documents.create(trip_id, document).await?;

        info!("📄 Documento {} ({}) agregado al viaje {}", created.id, created.kind, trip_id);

        Ok(ApiResponse::success_with_message(created, "Documento agregado exitosamente".to_string()))
    }

    pub async fn list(&self, trip_id: i64, warning_days: Option<i64>) -> Result<ExpiryReport, AppError> {
        let warning_days = self.warning_days(warning_days);
        self.trips.ensure_exists(trip_id).await?;

        let documents = self.documents.find_by_trip(trip_id).await?;
        Ok(ExpiryReport::build(documents, Local::now().date_naive(), warning_days))
    }

    pub async fn stats(&self, trip_id: i64, warning_days: Option<i64>) -> Result<DocumentStats, AppError> {
        let warning_days = self.warning_days(warning_days);
        self.trips.ensure_exists(trip_id).await?;

        let documents = self.documents.find_by_trip(trip_id).await?;
        Ok(DocumentStats::build(&documents, Local::now().date_naive(), warning_days))
    }

    pub async fn check(&self, trip_id: i64) -> Result<DocumentCheck, AppError> {
        self.trips.ensure_exists(trip_id).await?;

        let documents = self.documents.find_by_trip(trip_id).await?;
        let check = DocumentCheck::build(documents, Local::now().date_naive());
        if !check.complete {
            warn!(
                "⚠️ Viaje {}: faltan {:?}, {} documentos críticos",
                trip_id,
                check.missing_essential,
                check.critical.len()
            );
        }
        Ok(check)
    }

    pub async fn update(&self, id: i64, request: CreateDocumentRequest) -> Result<ApiResponse<Document>, AppError> {
        let document = new_document(request)?;
        let updated = self
            .documents
            .update(id, document)
            .await?
            .ok_or_else(|| not_found_error("Document", id))?;

        info!("📄 Documento {} actualizado", id);

        Ok(ApiResponse::success_with_message(updated, "Documento actualizado exitosamente".to_string()))
    }

    // Los valores negativos cuentan como 0
    fn warning_days(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.default_warning_days).max(0)
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        if !self.documents.delete(id).await? {
            return Err(not_found_error("Document", id));
        }
        Ok(ApiResponse::message("Documento eliminado exitosamente".to_string()))
    }
}

fn new_document(request: CreateDocumentRequest) -> Result<NewDocument, AppError> {
    request.validate()?;
    Ok(NewDocument {
        kind: request.kind.trim().to_string(),
        name: request.name.trim().to_string(),
        number: non_empty(request.number),
        expires_on: request.expires_on,
        notes: non_empty(request.notes),
    })
}
