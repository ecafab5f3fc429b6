//! Servicios del sistema
//!
//! Lógica de dominio sin acceso a base de datos.

pub mod activity_service;
pub mod document_service;
pub mod expense_service;
pub mod lodging_service;
pub mod transport_service;
pub mod trip_service;
