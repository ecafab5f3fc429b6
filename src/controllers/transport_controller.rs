use tracing::{info, warn};
use validator::Validate;

use crate::dto::transport_dto::{CreateTransportRequest, ItineraryResponse};
use crate::dto::ApiResponse;
use crate::models::transport::{NewTransport, Transport, DEFAULT_TRANSPORT_KIND};
use crate::repositories::transport_repository::TransportRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::transport_service::{
    build_itinerary, tight_connections, TransportCheck, DEFAULT_MIN_CONNECTION_MINUTES,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{non_empty, parse_time_field};

pub struct TransportController {
    trips: TripRepository,
    transports: TransportRepository,
}

impl TransportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            transports: TransportRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(&self, trip_id: i64, request: CreateTransportRequest) -> Result<ApiResponse<Transport>, AppError> {
        let transport = new_transport(request)?;
        self.trips.ensure_exists(trip_id).await?;

        let created = self.transports.create(trip_id, transport).await?;

        info!(
            "✈️ Transporte {} {} → {} agregado al viaje {}",
            created.kind, created.origin, created.destination, trip_id
        );

        Ok(ApiResponse::success_with_message(created, "Transporte agregado exitosamente".to_string()))
    }

    pub async fn list(&self, trip_id: i64) -> Result<Vec<Transport>, AppError> {
        self.trips.ensure_exists(trip_id).await?;
        self.transports.find_by_trip(trip_id).await
    }

    pub async fn update(&self, id: i64, request: CreateTransportRequest) -> Result<ApiResponse<Transport>, AppError> {
        let transport = new_transport(request)?;
        let updated = self
            .transports
            .update(id, transport)
            .await?
            .ok_or_else(|| not_found_error("Transport", id))?;

        info!("✈️ Transporte {} actualizado", id);

        Ok(ApiResponse::success_with_message(updated, "Transporte actualizado exitosamente".to_string()))
    }

    pub async fn itinerary(&self, trip_id: i64, min_connection_minutes: Option<i64>) -> Result<ItineraryResponse, AppError> {
        let minimum = min_connection_minutes.unwrap_or(DEFAULT_MIN_CONNECTION_MINUTES).max(0);
        self.trips.ensure_exists(trip_id).await?;

        let legs = build_itinerary(self.transports.find_by_trip(trip_id).await?);
        let tight = tight_connections(&legs, minimum);
        if !tight.is_empty() {
            warn!("⚠️ Viaje {} con {} conexiones ajustadas (< {} min)", trip_id, tight.len(), minimum);
        }

        Ok(ItineraryResponse {
            minimum_connection_minutes: minimum,
            legs,
            tight_connections: tight,
        })
    }

    pub async fn check(&self, trip_id: i64, min_connection_minutes: Option<i64>) -> Result<TransportCheck, AppError> {
        let minimum = min_connection_minutes.unwrap_or(DEFAULT_MIN_CONNECTION_MINUTES).max(0);
        self.trips.ensure_exists(trip_id).await?;

        let transports = self.transports.find_by_trip(trip_id).await?;
        Ok(TransportCheck::build(transports, minimum))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        if !self.transports.delete(id).await? {
            return Err(not_found_error("Transport", id));
        }
        Ok(ApiResponse::message("Transporte eliminado exitosamente".to_string()))
    }
}

fn new_transport(request: CreateTransportRequest) -> Result<NewTransport, AppError> {
    request.validate()?;
    let departure_time = parse_time_field("departure_time", request.departure_time.as_deref())?;
    let arrival_time = parse_time_field("arrival_time", request.arrival_time.as_deref())?;

    Ok(NewTransport {
        kind: non_empty(request.kind)
            .map(|k| k.to_lowercase())
            .unwrap_or_else(|| DEFAULT_TRANSPORT_KIND.to_string()),
        origin: request.origin.trim().to_string(),
        destination: request.destination.trim().to_string(),
        booking_code: non_empty(request.booking_code),
        departure_date: request.departure_date,
        departure_time,
        arrival_date: request.arrival_date,
        arrival_time,
        carrier: non_empty(request.carrier),
        service_number: non_empty(request.service_number),
        terminal: non_empty(request.terminal),
        gate: non_empty(request.gate),
        seat: non_empty(request.seat),
        notes: non_empty(request.notes),
    })
}
