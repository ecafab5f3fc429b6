//! Itinerario de transportes
//!
//! Tiempos de viaje de cada tramo, tiempo de conexión con el siguiente y
//! detección de conexiones demasiado ajustadas.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::transport::Transport;

/// Conexión mínima recomendada entre dos tramos
pub const DEFAULT_MIN_CONNECTION_MINUTES: i64 = 60;

fn at(date: NaiveDate, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    time.map(|t| date.and_time(t))
}

#[derive(Debug, Clone, Serialize)]
pub struct ItineraryLeg {
    pub transport: Transport,
    /// Duración del tramo; si la hora de llegada es anterior a la de salida
    /// se asume que llega al día siguiente
    pub travel_minutes: Option<i64>,
    /// Desde la llegada de este tramo hasta la salida del siguiente. Negativa
    /// si los tramos se solapan.
    pub connection_minutes: Option<i64>,
    pub next_transport_id: Option<i64>,
    pub is_last: bool,
}

/// `transports` debe venir ordenado por salida
pub fn build_itinerary(transports: Vec<Transport>) -> Vec<ItineraryLeg> {
    let next_departures: Vec<(i64, Option<NaiveDateTime>)> = transports
        .iter()
        .skip(1)
        .map(|t| (t.id, at(t.departure_date, t.departure_time)))
        .collect();
    let total = transports.len();

    transports
        .into_iter()
        .enumerate()
        .map(|(i, transport)| {
            let departure = at(transport.departure_date, transport.departure_time);
            let arrival = at(transport.arrival_date, transport.arrival_time);

            let travel_minutes = match (departure, arrival) {
                (Some(departure), Some(mut arrival)) => {
                    if arrival < departure {
                        arrival += Duration::days(1);
                    }
                    Some((arrival - departure).num_minutes())
                }
                _ => None,
            };

            let next = next_departures.get(i);
            let connection_minutes = match (arrival, next.and_then(|&(_, departure)| departure)) {
                (Some(arrival), Some(next_departure)) => Some((next_departure - arrival).num_minutes()),
                _ => None,
            };

            ItineraryLeg {
                transport,
                travel_minutes,
                connection_minutes,
                next_transport_id: next.map(|&(id, _)| id),
                is_last: i + 1 == total,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TightConnection {
    pub from_transport_id: i64,
    pub to_transport_id: i64,
    pub connection_minutes: i64,
    pub minimum_minutes: i64,
    pub shortfall_minutes: i64,
}

/// Conexiones conocidas por debajo de `minimum_minutes`
pub fn tight_connections(legs: &[ItineraryLeg], minimum_minutes: i64) -> Vec<TightConnection> {
    legs.iter()
        .filter_map(|leg| {
            let connection = leg.connection_minutes?;
            let next = leg.next_transport_id?;
            (connection < minimum_minutes).then(|| TightConnection {
                from_transport_id: leg.transport.id,
                to_transport_id: next,
                connection_minutes: connection,
                minimum_minutes,
                shortfall_minutes: minimum_minutes - connection,
            })
        })
        .collect()
}

/// Revisión de los transportes de un viaje con recomendaciones
#[derive(Debug, Clone, Serialize)]
pub struct TransportCheck {
    pub complete: bool,
    pub total_transports: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub without_booking_code: Vec<i64>,
    pub without_schedule: Vec<i64>,
    pub without_carrier_details: Vec<i64>,
    pub tight_connections: Vec<TightConnection>,
    pub recommendations: Vec<String>,
}

impl TransportCheck {
    pub fn build(transports: Vec<Transport>, minimum_minutes: i64) -> Self {
        let mut by_kind = BTreeMap::new();
        for transport in &transports {
            *by_kind.entry(transport.kind.clone()).or_insert(0) += 1;
        }
        let ids = |keep: fn(&Transport) -> bool| -> Vec<i64> {
            transports.iter().filter(|t| keep(t)).map(|t| t.id).collect()
        };
        let without_booking_code = ids(|t| t.booking_code.is_none());
        let without_schedule = ids(|t| t.departure_time.is_none() || t.arrival_time.is_none());
        let without_carrier_details = ids(|t| t.carrier.is_none() && t.service_number.is_none());
        let total_transports = transports.len();

        let legs = build_itinerary(transports);
        let tight = tight_connections(&legs, minimum_minutes);

        let mut recommendations = Vec::new();
        if total_transports == 0 {
            recommendations.push("Agregar información de transportes para el viaje".to_string());
        }
        if !without_booking_code.is_empty() {
            recommendations.push(format!(
                "Agregar códigos de reserva para {} transportes",
                without_booking_code.len()
            ));
        }
        if !without_schedule.is_empty() {
            recommendations.push(format!("Completar horarios para {} transportes", without_schedule.len()));
        }
        if !tight.is_empty() {
            recommendations.push(format!("Revisar {} conexiones muy ajustadas", tight.len()));
        }

        Self {
            complete: without_booking_code.is_empty() && without_schedule.is_empty() && tight.is_empty(),
            total_transports,
            by_kind,
            without_booking_code,
            without_schedule,
            without_carrier_details,
            tight_connections: tight,
            recommendations,
        }
    }
}
