use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::stop::{Stop, StopFields};
use crate::utils::validation::{non_empty, validate_date_order, validate_not_blank};

/// Datos de una parada, usados al crear y al editar
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_stop_dates"))]
pub struct StopRequest {
    #[serde(alias = "destino")]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub destination: String,
    #[serde(alias = "fecha_llegada")]
    pub arrival_date: NaiveDate,
    #[serde(alias = "fecha_salida")]
    pub departure_date: NaiveDate,
    #[serde(default, alias = "notas")]
    pub notes: Option<String>,
}

fn validate_stop_dates(request: &StopRequest) -> Result<(), ValidationError> {
    validate_date_order(request.arrival_date, request.departure_date)
}

impl From<StopRequest> for StopFields {
    fn from(request: StopRequest) -> Self {
        StopFields {
            destination: request.destination.trim().to_string(),
            arrival_date: request.arrival_date,
            departure_date: request.departure_date,
            notes: non_empty(request.notes),
        }
    }
}

/// Posición destino de un movimiento manual (1-indexada)
#[derive(Debug, Deserialize)]
pub struct ReorderStopRequest {
    #[serde(default, alias = "nuevo_orden")]
    pub target_position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub id: i64,
    pub trip_id: i64,
    pub destination: String,
    pub position: i32,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub nights: i64,
    pub notes: Option<String>,
}

impl From<Stop> for StopResponse {
    fn from(stop: Stop) -> Self {
        Self {
            nights: stop.nights(),
            id: stop.id,
            trip_id: stop.trip_id,
            destination: stop.destination,
            position: stop.position,
            arrival_date: stop.arrival_date,
            departure_date: stop.departure_date,
            notes: stop.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_spanish_field_names() {
        let request: StopRequest = serde_json::from_value(json!({
            "destino": "Cusco",
            "fecha_llegada": "2024-03-01",
            "fecha_salida": "2024-03-04",
            "notas": "  "
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let fields = StopFields::from(request);
        assert_eq!(fields.destination, "Cusco");
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn test_departure_before_arrival_is_rejected() {
        let request: StopRequest = serde_json::from_value(json!({
            "destination": "Lima",
            "arrival_date": "2024-03-04",
            "departure_date": "2024-03-01"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_destination_is_rejected() {
        let request: StopRequest = serde_json::from_value(json!({
            "destination": "   ",
            "arrival_date": "2024-03-01",
            "departure_date": "2024-03-01"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_reorder_alias_and_missing_target() {
        let request: ReorderStopRequest = serde_json::from_value(json!({"nuevo_orden": 2})).unwrap();
        assert_eq!(request.target_position, Some(2));

        let request: ReorderStopRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.target_position, None);
    }
}
