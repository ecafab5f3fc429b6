//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error de la aplicación
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::sequencing::SequencingError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Validation failure: {0}")]
    ValidationFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Sequencing failure: {0}")]
    Sequencing(String),
}

impl From<SequencingError> for AppError {
    fn from(err: SequencingError) -> Self {
        match err {
            SequencingError::StopNotFound(id) => not_found_error("Stop", id),
            SequencingError::Failure(e) => AppError::Sequencing(e.to_string()),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Sequencing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::ValidationFailure(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                ErrorResponse {
                    success: false,
                    error: e.to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: None,
                    code: "DB_ERROR",
                }
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    success: false,
                    error: e.to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: "VALIDATION_ERROR",
                }
            }

            AppError::ValidationFailure(msg) => {
                warn!("Validation failure: {}", msg);
                ErrorResponse {
                    success: false,
                    error: msg.clone(),
                    message: msg,
                    details: None,
                    code: "VALIDATION_ERROR",
                }
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    success: false,
                    error: msg.clone(),
                    message: msg,
                    details: None,
                    code: "NOT_FOUND",
                }
            }

            AppError::Sequencing(msg) => {
                error!("Sequencing failure: {}", msg);
                ErrorResponse {
                    success: false,
                    error: msg,
                    message: "Stop order was left unchanged".to_string(),
                    details: None,
                    code: "SEQUENCING_ERROR",
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de validación sin campo asociado
pub fn validation_failure(message: &str) -> AppError {
    AppError::ValidationFailure(message.to_string())
}
