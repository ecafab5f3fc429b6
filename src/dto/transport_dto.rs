use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::services::transport_service::{ItineraryLeg, TightConnection};

use crate::utils::validation::{validate_date_order, validate_not_blank, validate_time_input};

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_transport_dates"))]
pub struct CreateTransportRequest {
    #[serde(default, alias = "tipo")]
    #[validate(length(max = 20))]
    pub kind: Option<String>,
    #[serde(alias = "origen")]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub origin: String,
    #[serde(alias = "destino")]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub destination: String,
    #[serde(alias = "fecha_salida")]
    pub departure_date: NaiveDate,
    #[serde(default, alias = "hora_salida")]
    #[validate(custom = "validate_time_input")]
    pub departure_time: Option<String>,
    #[serde(alias = "fecha_llegada")]
    pub arrival_date: NaiveDate,
    #[serde(default, alias = "hora_llegada")]
    #[validate(custom = "validate_time_input")]
    pub arrival_time: Option<String>,
    #[serde(default, alias = "codigo_reserva")]
    #[validate(length(max = 50))]
    pub booking_code: Option<String>,
    #[serde(default, alias = "compania")]
    #[validate(length(max = 100))]
    pub carrier: Option<String>,
    #[serde(default, alias = "numero_servicio")]
    #[validate(length(max = 20))]
    pub service_number: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub terminal: Option<String>,
    #[serde(default, alias = "puerta")]
    #[validate(length(max = 10))]
    pub gate: Option<String>,
    #[serde(default, alias = "asiento")]
    #[validate(length(max = 10))]
    pub seat: Option<String>,
    #[serde(default, alias = "notas")]
    pub notes: Option<String>,
}

fn validate_transport_dates(request: &CreateTransportRequest) -> Result<(), ValidationError> {
    validate_date_order(request.departure_date, request.arrival_date)
}

/// `?min_connection_minutes=` para el itinerario y la revisión
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionQuery {
    pub min_connection_minutes: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub minimum_connection_minutes: i64,
    pub legs: Vec<ItineraryLeg>,
    pub tight_connections: Vec<TightConnection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arrival_before_departure_is_rejected() {
        let request: CreateTransportRequest = serde_json::from_value(json!({
            "origin": "Lima",
            "destination": "Cusco",
            "departure_date": "2024-03-05",
            "arrival_date": "2024-03-04"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_overnight_bus_is_accepted() {
        let request: CreateTransportRequest = serde_json::from_value(json!({
            "tipo": "bus",
            "origen": "Cusco",
            "destino": "Puno",
            "fecha_salida": "2024-03-05",
            "hora_salida": "22:00",
            "fecha_llegada": "2024-03-06",
            "hora_llegada": "05:30"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.kind.as_deref(), Some("bus"));
    }
}
