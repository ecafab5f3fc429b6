//! Utilidades del sistema
//!
//! Manejo de errores y validación de datos de entrada.

pub mod errors;
pub mod validation;
