//! Agrupación de actividades por destino
//!
//! `general` va siempre primero y el resto de destinos en orden alfabético.
//! Dentro de cada grupo las actividades se ordenan por fecha y hora; las que
//! no tienen hora van antes que las que sí la tienen en el mismo día.
//! También calcula el avance (completadas / pendientes) del viaje.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::activity::{Activity, GENERAL_DESTINATION};

#[derive(Debug, Clone, Serialize)]
pub struct ActivityGroup {
    pub destination: String,
    pub activities: Vec<Activity>,
}

pub fn group_by_destination(activities: Vec<Activity>) -> Vec<ActivityGroup> {
    let mut groups: BTreeMap<String, Vec<Activity>> = BTreeMap::new();
    for activity in activities {
        let destination = if activity.destination.trim().is_empty() {
            GENERAL_DESTINATION.to_string()
        } else {
            activity.destination.clone()
        };
        groups.entry(destination).or_default().push(activity);
    }

    for list in groups.values_mut() {
        list.sort_by_key(|a| (a.scheduled_on, a.scheduled_at));
    }

    let general = groups.remove(GENERAL_DESTINATION);
    general
        .map(|activities| ActivityGroup {
            destination: GENERAL_DESTINATION.to_string(),
            activities,
        })
        .into_iter()
        .chain(
            groups
                .into_iter()
                .map(|(destination, activities)| ActivityGroup { destination, activities }),
        )
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DestinationProgress {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Porcentaje con un decimal
    pub completion_rate: f64,
    pub by_destination: BTreeMap<String, DestinationProgress>,
}

impl ActivityStats {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut by_destination: BTreeMap<String, DestinationProgress> = BTreeMap::new();
        for activity in activities {
            let destination = if activity.destination.trim().is_empty() {
                GENERAL_DESTINATION
            } else {
                activity.destination.as_str()
            };
            let progress = by_destination.entry(destination.to_string()).or_default();
            progress.total += 1;
            if activity.completed {
                progress.completed += 1;
            }
        }

        let total = activities.len();
        let completed = activities.iter().filter(|a| a.completed).count();
        let completion_rate = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64 * 1000.0).round() / 10.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
            by_destination,
        }
    }
}
