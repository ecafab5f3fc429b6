use tracing::info;
use validator::Validate;

use crate::dto::lodging_dto::{CreateLodgingRequest, LodgingListResponse, DEFAULT_CHECK_IN_TIME, DEFAULT_CHECK_OUT_TIME};
use crate::dto::ApiResponse;
use crate::models::lodging::{Lodging, NewLodging};
use crate::repositories::lodging_repository::LodgingRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::lodging_service::{LodgingCheck, LodgingCoverage, StaySummary};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{non_empty, parse_time_field_or};

pub struct LodgingController {
    trips: TripRepository,
    lodgings: LodgingRepository,
}

impl LodgingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            lodgings: LodgingRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(&self, trip_id: i64, request: CreateLodgingRequest) -> Result<ApiResponse<Lodging>, AppError> {
        let lodging = new_lodging(request)?;
        self.trips.ensure_exists(trip_id).await?;

        let created = self.lodgings.create(trip_id, lodging).await?;

        info!("🏨 Alojamiento {} ({} noches) agregado al viaje {}", created.name, created.nights(), trip_id);

        Ok(ApiResponse::success_with_message(created, "Alojamiento agregado exitosamente".to_string()))
    }

    pub async fn list(&self, trip_id: i64) -> Result<LodgingListResponse, AppError> {
        self.trips.ensure_exists(trip_id).await?;
        let lodgings = self.lodgings.find_by_trip(trip_id).await?;

        Ok(LodgingListResponse {
            summary: StaySummary::from_lodgings(&lodgings),
            lodgings,
        })
    }

    pub async fn update(&self, id: i64, request: CreateLodgingRequest) -> Result<ApiResponse<Lodging>, AppError> {
        let lodging = new_lodging(request)?;
        let updated = self
            .lodgings
            .update(id, lodging)
            .await?
            .ok_or_else(|| not_found_error("Lodging", id))?;

        info!("🏨 Alojamiento {} actualizado", id);

        Ok(ApiResponse::success_with_message(updated, "Alojamiento actualizado exitosamente".to_string()))
    }

    pub async fn coverage(&self, trip_id: i64) -> Result<LodgingCoverage, AppError> {
        let trip = self.trips.find_by_id(trip_id).await?.ok_or_else(|| not_found_error("Trip", trip_id))?;
        let lodgings = self.lodgings.find_by_trip(trip_id).await?;
        Ok(LodgingCoverage::check(trip.start_date, trip.end_date, &lodgings))
    }

    pub async fn check(&self, trip_id: i64) -> Result<LodgingCheck, AppError> {
        let trip = self.trips.find_by_id(trip_id).await?.ok_or_else(|| not_found_error("Trip", trip_id))?;
        let lodgings = self.lodgings.find_by_trip(trip_id).await?;
        Ok(LodgingCheck::build(trip.start_date, trip.end_date, &lodgings))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        if !self.lodgings.delete(id).await? {
            return Err(not_found_error("Lodging", id));
        }
        Ok(ApiResponse::message("Alojamiento eliminado exitosamente".to_string()))
    }
}

/// Valida la petición y aplica las horas por defecto
fn new_lodging(request: CreateLodgingRequest) -> Result<NewLodging, AppError> {
    request.validate()?;
    let check_in_time = parse_time_field_or("check_in_time", request.check_in_time.as_deref(), DEFAULT_CHECK_IN_TIME)?;
    let check_out_time =
        parse_time_field_or("check_out_time", request.check_out_time.as_deref(), DEFAULT_CHECK_OUT_TIME)?;

    Ok(NewLodging {
        destination: request.destination.trim().to_string(),
        name: request.name.trim().to_string(),
        address: request.address.trim().to_string(),
        check_in_date: request.check_in_date,
        check_in_time,
        check_out_date: request.check_out_date,
        check_out_time,
        breakfast_included: request.breakfast_included,
        confirmation_number: non_empty(request.confirmation_number),
        pin_code: non_empty(request.pin_code),
        check_in_number: non_empty(request.check_in_number),
    })
}
