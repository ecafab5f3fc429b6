use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::stop_dto::{ReorderStopRequest, StopRequest, StopResponse};
use crate::dto::ApiResponse;
use crate::models::stop::{Stop, StopFields};
use crate::repositories::stop_repository::StopRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::sequencing::StopSequencer;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_failure, AppError};

/// Toda mutación de paradas termina en el motor de secuencia
pub struct StopController {
    trips: TripRepository,
    stops: StopRepository,
    sequencer: Arc<StopSequencer>,
}

impl StopController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            stops: StopRepository::new(state.pool.clone()),
            sequencer: state.sequencer.clone(),
        }
    }

    pub async fn create(&self, trip_id: i64, request: StopRequest) -> Result<ApiResponse<StopResponse>, AppError> {
        request.validate()?;
        self.trips.ensure_exists(trip_id).await?;

        let stop = self.stops.create(trip_id, StopFields::from(request)).await?;
        self.sequencer.resort_by_date(trip_id).await?;
        let stop = self.reload(stop.id).await?;

        info!(
            "📍 Parada {} ({}) agregada al viaje {} en posición {}",
            stop.id, stop.destination, trip_id, stop.position
        );

        Ok(ApiResponse::success_with_message(
            StopResponse::from(stop),
            "Parada agregada exitosamente".to_string(),
        ))
    }

    pub async fn update(&self, id: i64, request: StopRequest) -> Result<ApiResponse<StopResponse>, AppError> {
        request.validate()?;

        let stop = self
            .stops
            .update(id, StopFields::from(request))
            .await?
            .ok_or_else(|| not_found_error("Stop", id))?;
        self.sequencer.resort_by_date(stop.trip_id).await?;
        let stop = self.reload(stop.id).await?;

        Ok(ApiResponse::success_with_message(
            StopResponse::from(stop),
            "Parada actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        let removed = self.sequencer.remove_stop(id).await?;
        info!("🗑️ Parada {} eliminada del viaje {}", removed.id, removed.trip_id);
        Ok(ApiResponse::message("Parada eliminada exitosamente".to_string()))
    }

    /// Mueve la parada a `target_position`; fuera de rango se ajusta a los extremos
    pub async fn reorder(&self, id: i64, request: ReorderStopRequest) -> Result<ApiResponse<()>, AppError> {
        let target = request
            .target_position
            .ok_or_else(|| validation_failure("target_position is required"))?;

        self.sequencer.move_stop(id, target).await?;
        Ok(ApiResponse::ok())
    }

    async fn reload(&self, id: i64) -> Result<Stop, AppError> {
        self.stops.find_by_id(id).await?.ok_or_else(|| not_found_error("Stop", id))
    }
}
