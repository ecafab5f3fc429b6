//! Utilidades de validación
//!
//! Funciones helper para validar datos de entrada y convertir horas.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Código de moneda ISO 4217 (tres letras mayúsculas)
    pub static ref CURRENCY_CODE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Validar y convertir string a hora (`HH:MM` o `HH:MM:SS`)
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM".to_string());
            error
        })
}

/// Hora opcional: vacío o ausente se trata como `None`
pub fn validate_optional_time(value: Option<&str>) -> Result<Option<NaiveTime>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => validate_time(v).map(Some),
    }
}

/// Validador para campos de hora en DTOs; vacío equivale a ausente
pub fn validate_time_input(value: &str) -> Result<(), ValidationError> {
    validate_optional_time(Some(value)).map(|_| ())
}

fn field_errors(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Hora opcional de un campo ya validado por el DTO
pub fn parse_time_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveTime>, ValidationErrors> {
    validate_optional_time(value).map_err(|error| field_errors(field, error))
}

/// Hora con valor por defecto cuando el campo falta o está vacío
pub fn parse_time_field_or(
    field: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<NaiveTime, ValidationErrors> {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default);
    validate_time(value).map_err(|error| field_errors(field, error))
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar que `end` no sea anterior a `start`
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("date_order");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que `end` sea estrictamente posterior a `start`
pub fn validate_strictly_after(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end <= start {
        let mut error = ValidationError::new("strictly_after");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        return Err(error);
    }
    Ok(())
}

/// Texto opcional: los strings vacíos se guardan como NULL
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
