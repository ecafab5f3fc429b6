use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::info;
use validator::Validate;

use crate::dto::stop_dto::StopResponse;
use crate::dto::trip_dto::{
    CreateTripRequest, ResortAllResponse, TripCreatedResponse, TripDeletedResponse, TripDetailResponse,
    TripSummaryResponse,
};
use crate::dto::ApiResponse;
use crate::models::stop::{Stop, StopFields};
use crate::models::trip::NewTrip;
use crate::repositories::activity_repository::ActivityRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::sequencing::StopSequencer;
use crate::services::activity_service::group_by_destination;
use crate::services::trip_service::StopPreview;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::non_empty;

pub struct TripController {
    trips: TripRepository,
    stops: StopRepository,
    activities: ActivityRepository,
    sequencer: Arc<StopSequencer>,
}

impl TripController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            stops: StopRepository::new(state.pool.clone()),
            activities: ActivityRepository::new(state.pool.clone()),
            sequencer: state.sequencer.clone(),
        }
    }

    pub async fn create(&self, request: CreateTripRequest) -> Result<ApiResponse<TripCreatedResponse>, AppError> {
        request.validate()?;

        let trip = NewTrip {
            name: request.name.trim().to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            total_budget: request.total_budget.unwrap_or(Decimal::ZERO),
            notes: non_empty(request.notes),
        };
        let stops: Vec<StopFields> = request.stops.into_iter().map(StopFields::from).collect();
        let stop_count = stops.len();

        let created = self.trips.create_with_stops(trip, stops).await?;
        self.sequencer.resort_by_date(created.id).await?;

        info!("🧳 Viaje {} creado con {} paradas", created.id, stop_count);

        Ok(ApiResponse::success_with_message(
            TripCreatedResponse {
                id: created.id,
                stops: stop_count,
            },
            "Viaje creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<TripSummaryResponse>, AppError> {
        let trips = self.trips.find_all().await?;
        let ids: Vec<i64> = trips.iter().map(|t| t.id).collect();

        let mut stops_by_trip: HashMap<i64, Vec<Stop>> = HashMap::new();
        for stop in self.stops.find_by_trips(&ids).await? {
            stops_by_trip.entry(stop.trip_id).or_default().push(stop);
        }

        let today = Local::now().date_naive();
        let response = trips
            .into_iter()
            .map(|trip| {
                let preview = StopPreview::from_stops(stops_by_trip.get(&trip.id).map_or(&[][..], Vec::as_slice));
                TripSummaryResponse::new(trip, today, preview)
            })
            .collect();

        Ok(response)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<TripDetailResponse, AppError> {
        let trip = self
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))?;

        let stops = self.stops.find_by_trip(id).await?;
        let activities = self.activities.find_by_trip(id).await?;

        Ok(TripDetailResponse::new(
            trip,
            Local::now().date_naive(),
            stops.into_iter().map(StopResponse::from).collect(),
            group_by_destination(activities),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<TripDeletedResponse>, AppError> {
        let removed = self.trips.delete(id).await?.ok_or_else(|| not_found_error("Trip", id))?;
        let removed_total = removed.total();

        info!("🗑️ Viaje {} eliminado junto con {} registros", id, removed_total);

        Ok(ApiResponse::success_with_message(
            TripDeletedResponse {
                id,
                removed,
                removed_total,
            },
            "Viaje eliminado exitosamente".to_string(),
        ))
    }

    pub async fn resort(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        self.trips.ensure_exists(id).await?;
        self.sequencer.resort_by_date(id).await?;
        Ok(ApiResponse::ok())
    }

    pub async fn resort_all(&self) -> Result<ApiResponse<ResortAllResponse>, AppError> {
        let trips_resorted = self.sequencer.resort_all().await?;

        Ok(ApiResponse::success_with_message(
            ResortAllResponse { trips_resorted },
            format!("{} viajes reordenados", trips_resorted),
        ))
    }
}
