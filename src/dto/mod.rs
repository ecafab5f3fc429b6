//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializados con `serde`.

use serde::Serialize;

pub mod activity_dto;
pub mod document_dto;
pub mod expense_dto;
pub mod lodging_dto;
pub mod stop_dto;
pub mod transport_dto;
pub mod trip_dto;

/// Envoltorio común de respuestas
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Respuesta sin datos, p. ej. `{"success": true}`
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    pub fn message(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}
