use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::stop_dto::{StopRequest, StopResponse};
use crate::models::trip::{Trip, TripChildCounts, TripStatus};
use crate::services::activity_service::ActivityGroup;
use crate::services::trip_service::StopPreview;
use crate::utils::validation::{validate_date_order, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_trip_request"))]
pub struct CreateTripRequest {
    #[serde(alias = "nombre")]
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[serde(alias = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(alias = "fecha_fin")]
    pub end_date: NaiveDate,
    #[serde(default, alias = "presupuesto_total")]
    pub total_budget: Option<Decimal>,
    #[serde(default, alias = "notas")]
    pub notes: Option<String>,
    #[serde(default, alias = "paradas")]
    #[validate]
    pub stops: Vec<StopRequest>,
}

fn validate_trip_request(request: &CreateTripRequest) -> Result<(), ValidationError> {
    validate_date_order(request.start_date, request.end_date)?;
    if request.total_budget.is_some_and(|b| b.is_sign_negative()) {
        return Err(ValidationError::new("negative_budget"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TripCreatedResponse {
    pub id: i64,
    pub stops: usize,
}

/// Elemento del listado de viajes
#[derive(Debug, Serialize)]
pub struct TripSummaryResponse {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub total_budget: Decimal,
    pub spent_budget: Decimal,
    pub stops: StopPreview,
}

impl TripSummaryResponse {
    pub fn new(trip: Trip, today: NaiveDate, stops: StopPreview) -> Self {
        Self {
            status: trip.status_on(today),
            id: trip.id,
            name: trip.name,
            start_date: trip.start_date,
            end_date: trip.end_date,
            total_budget: trip.total_budget,
            spent_budget: trip.spent_budget,
            stops,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub total_budget: Decimal,
    pub spent_budget: Decimal,
    pub remaining_budget: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<StopResponse>,
    pub activities: Vec<ActivityGroup>,
}

impl TripDetailResponse {
    pub fn new(
        trip: Trip,
        today: NaiveDate,
        stops: Vec<StopResponse>,
        activities: Vec<ActivityGroup>,
    ) -> Self {
        Self {
            status: trip.status_on(today),
            remaining_budget: trip.remaining_budget(),
            id: trip.id,
            name: trip.name,
            start_date: trip.start_date,
            end_date: trip.end_date,
            total_budget: trip.total_budget,
            spent_budget: trip.spent_budget,
            notes: trip.notes,
            created_at: trip.created_at,
            stops,
            activities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripDeletedResponse {
    pub id: i64,
    pub removed: TripChildCounts,
    pub removed_total: i64,
}

#[derive(Debug, Serialize)]
pub struct ResortAllResponse {
    pub trips_resorted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateTripRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_trip_with_stops() {
        let request = request(json!({
            "name": "Andes",
            "start_date": "2024-03-01",
            "end_date": "2024-03-20",
            "total_budget": "1500.00",
            "stops": [
                {"destination": "Lima", "arrival_date": "2024-03-01", "departure_date": "2024-03-03"},
                {"destino": "Cusco", "fecha_llegada": "2024-03-03", "fecha_salida": "2024-03-08"}
            ]
        }));
        assert!(request.validate().is_ok());
        assert_eq!(request.stops.len(), 2);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let request = request(json!({
            "name": "Andes",
            "start_date": "2024-03-10",
            "end_date": "2024-03-01"
        }));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let request = request(json!({
            "name": "Andes",
            "start_date": "2024-03-01",
            "end_date": "2024-03-02",
            "total_budget": -5
        }));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_nested_stop_is_rejected() {
        let request = request(json!({
            "name": "Andes",
            "start_date": "2024-03-01",
            "end_date": "2024-03-20",
            "stops": [
                {"destination": "", "arrival_date": "2024-03-01", "departure_date": "2024-03-03"}
            ]
        }));
        assert!(request.validate().is_err());
    }
}
