use tracing::info;
use validator::Validate;

use crate::dto::activity_dto::{ActivityStateResponse, CompleteActivityRequest, CreateActivityRequest};
use crate::dto::ApiResponse;
use crate::models::activity::{Activity, NewActivity, GENERAL_DESTINATION};
use crate::repositories::activity_repository::ActivityRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::activity_service::{group_by_destination, ActivityGroup, ActivityStats};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{non_empty, parse_time_field};

pub struct ActivityController {
    trips: TripRepository,
    activities: ActivityRepository,
}

impl ActivityController {
    pub fn new(state: &AppState) -> Self {
        Self {
            trips: TripRepository::new(state.pool.clone()),
            activities: ActivityRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(&self, trip_id: i64, request: CreateActivityRequest) -> Result<ApiResponse<Activity>, AppError> {
        let activity = new_activity(request)?;
        self.trips.ensure_exists(trip_id).await?;

        let created = self.activities.create(trip_id, activity).await?;

        info!("🎯 Actividad {} creada en viaje {}", created.id, trip_id);

        Ok(ApiResponse::success_with_message(created, "Actividad creada exitosamente".to_string()))
    }

    pub async fn list(&self, trip_id: i64) -> Result<Vec<ActivityGroup>, AppError> {
        self.trips.ensure_exists(trip_id).await?;
        let activities = self.activities.find_by_trip(trip_id).await?;
        Ok(group_by_destination(activities))
    }

    pub async fn stats(&self, trip_id: i64) -> Result<ActivityStats, AppError> {
        self.trips.ensure_exists(trip_id).await?;
        let activities = self.activities.find_by_trip(trip_id).await?;
        Ok(ActivityStats::from_activities(&activities))
    }

    pub async fn update(&self, id: i64, request: CreateActivityRequest) -> Result<ApiResponse<Activity>, AppError> {
        let activity = new_activity(request)?;
        let updated = self
            .activities
            .update(id, activity)
            .await?
            .ok_or_else(|| not_found_error("Activity", id))?;

        info!("🎯 Actividad {} actualizada", id);

        Ok(ApiResponse::success_with_message(updated, "Actividad actualizada exitosamente".to_string()))
    }

    pub async fn complete(&self, id: i64, request: CompleteActivityRequest) -> Result<ApiResponse<ActivityStateResponse>, AppError> {
        let activity = self
            .activities
            .set_completed(id, request.completed)
            .await?
            .ok_or_else(|| not_found_error("Activity", id))?;

        Ok(ApiResponse::success(ActivityStateResponse {
            id: activity.id,
            completed: activity.completed,
        }))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        if !self.activities.delete(id).await? {
            return Err(not_found_error("Activity", id));
        }
        Ok(ApiResponse::message("Actividad eliminada exitosamente".to_string()))
    }
}

fn new_activity(request: CreateActivityRequest) -> Result<NewActivity, AppError> {
    request.validate()?;
    let scheduled_at = parse_time_field("scheduled_at", request.scheduled_at.as_deref())?;

    Ok(NewActivity {
        destination: non_empty(request.destination).unwrap_or_else(|| GENERAL_DESTINATION.to_string()),
        name: request.name.trim().to_string(),
        scheduled_on: request.scheduled_on,
        scheduled_at,
        location: non_empty(request.location),
        description: non_empty(request.description),
    })
}
