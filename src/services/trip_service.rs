//! Resumen de paradas para el listado de viajes

use serde::Serialize;

use crate::models::stop::Stop;

/// Número de destinos mostrados en el listado
pub const PREVIEW_STOPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopPreview {
    pub total: usize,
    pub first_destinations: Vec<String>,
    pub has_more: bool,
    pub extra: usize,
}

impl StopPreview {
    /// `stops` debe venir ordenado por posición
    pub fn from_stops(stops: &[Stop]) -> Self {
        let total = stops.len();
        Self {
            total,
            first_destinations: stops
                .iter()
                .take(PREVIEW_STOPS)
                .map(|s| s.destination.clone())
                .collect(),
            has_more: total > PREVIEW_STOPS,
            extra: total.saturating_sub(PREVIEW_STOPS),
        }
    }
}
