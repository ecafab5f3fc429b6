//! Motor de secuencia de paradas
//!
//! Mantiene las posiciones de las paradas de un viaje como la secuencia
//! contigua `1..N`. Toda renumeración pasa por dos fases dentro de una misma
//! transacción: primero posiciones temporales negativas (que no pueden
//! chocar con ninguna posición real), luego las posiciones finales. Sólo se
//! confirma al final; cualquier error deshace ambas fases.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::gateway::{GatewayError, PositionAssignment, StopGateway, UnitOfWork};
use crate::models::stop::Stop;

/// Desplazamiento del rango temporal: la parada i-ésima pasa por `-(1000 + i)`
pub const STAGING_OFFSET: i32 = 1000;

#[derive(Error, Debug)]
pub enum SequencingError {
    #[error("Stop with id '{0}' not found")]
    StopNotFound(i64),

    #[error("{0}")]
    Failure(#[from] GatewayError),
}

/// Orden cronológico canónico: llegada, salida, destino sin mayúsculas, id
pub fn chronological_cmp(a: &Stop, b: &Stop) -> Ordering {
    a.arrival_date
        .cmp(&b.arrival_date)
        .then_with(|| a.departure_date.cmp(&b.departure_date))
        .then_with(|| a.destination.to_lowercase().cmp(&b.destination.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn chronological_order(stops: &mut [Stop]) {
    stops.sort_by(chronological_cmp);
}

/// Saca `stop_id` de `ordered` y lo vuelve a insertar en `target_position`
/// (1-indexada). Los destinos fuera de rango se ajustan al principio o al
/// final de la lista.
pub fn splice_at(mut ordered: Vec<Stop>, stop_id: i64, target_position: i64) -> Vec<Stop> {
    let Some(current) = ordered.iter().position(|s| s.id == stop_id) else {
        return ordered;
    };
    let moving = ordered.remove(current);

    let index = target_position.saturating_sub(1).clamp(0, ordered.len() as i64) as usize;
    ordered.insert(index, moving);
    ordered
}

pub fn staging_positions(ids: &[i64]) -> Vec<PositionAssignment> {
    ids.iter()
        .enumerate()
        .map(|(i, &stop_id)| PositionAssignment {
            stop_id,
            position: -(STAGING_OFFSET + i as i32),
        })
        .collect()
}

pub fn final_positions(ids: &[i64]) -> Vec<PositionAssignment> {
    ids.iter()
        .enumerate()
        .map(|(i, &stop_id)| PositionAssignment {
            stop_id,
            position: i as i32 + 1,
        })
        .collect()
}

/// Punto único de entrada para toda mutación de la secuencia de paradas
#[derive(Clone)]
pub struct Sequencer<G> {
    gateway: G,
}

impl<G: StopGateway> Sequencer<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Recalcula las posiciones de todas las paradas del viaje por fecha.
    /// Con 0 o 1 paradas no escribe nada.
    pub async fn resort_by_date(&self, trip_id: i64) -> Result<(), SequencingError> {
        let mut unit = self.gateway.begin().await?;

        match Self::resort_in(&mut unit, trip_id).await {
            Ok(true) => {
                unit.commit().await?;
                info!("✅ Paradas del viaje {} reordenadas por fecha", trip_id);
                Ok(())
            }
            Ok(false) => {
                unit.rollback().await?;
                debug!("Viaje {} con una parada o menos, no se reordena", trip_id);
                Ok(())
            }
            Err(e) => Err(Self::abort(unit, trip_id, e).await),
        }
    }

    async fn resort_in(unit: &mut G::Unit, trip_id: i64) -> Result<bool, GatewayError> {
        unit.lock_trip(trip_id).await?;
        let mut stops = unit.trip_stops(trip_id).await?;
        if stops.len() <= 1 {
            return Ok(false);
        }

        chronological_order(&mut stops);
        Self::renumber(unit, trip_id, &stops).await?;
        Ok(true)
    }

    /// Mueve una parada a la posición indicada desplazando las demás.
    /// Si ya está en esa posición no escribe nada.
    pub async fn move_stop(&self, stop_id: i64, target_position: i64) -> Result<(), SequencingError> {
        let mut unit = self.gateway.begin().await?;

        let trip_id = match Self::locked_trip_of(&mut unit, stop_id).await {
            Ok(Some(trip_id)) => trip_id,
            Ok(None) => {
                unit.rollback().await?;
                return Err(SequencingError::StopNotFound(stop_id));
            }
            Err(e) => return Err(Self::abort(unit, stop_id, e).await),
        };

        // Posición leída con el lock tomado
        let stop = match unit.find_stop(stop_id).await {
            Ok(Some(stop)) => stop,
            Ok(None) => {
                unit.rollback().await?;
                return Err(SequencingError::StopNotFound(stop_id));
            }
            Err(e) => return Err(Self::abort(unit, trip_id, e).await),
        };

        if i64::from(stop.position) == target_position {
            unit.rollback().await?;
            debug!("Parada {} ya está en la posición {}, nada que hacer", stop_id, target_position);
            return Ok(());
        }

        info!(
            "🔀 Moviendo parada {} del viaje {}: posición {} -> {}",
            stop_id, trip_id, stop.position, target_position
        );

        let result = async {
            let siblings = unit.trip_stops(trip_id).await?;
            let ordered = splice_at(siblings, stop_id, target_position);
            Self::renumber(&mut unit, trip_id, &ordered).await
        }
        .await;

        match result {
            Ok(()) => {
                unit.commit().await?;
                Ok(())
            }
            Err(e) => Err(Self::abort(unit, trip_id, e).await),
        }
    }

    /// Borra una parada y cierra el hueco en la misma transacción.
    /// Devuelve la parada eliminada.
    pub async fn remove_stop(&self, stop_id: i64) -> Result<Stop, SequencingError> {
        let mut unit = self.gateway.begin().await?;

        let trip_id = match Self::locked_trip_of(&mut unit, stop_id).await {
            Ok(Some(trip_id)) => trip_id,
            Ok(None) => {
                unit.rollback().await?;
                return Err(SequencingError::StopNotFound(stop_id));
            }
            Err(e) => return Err(Self::abort(unit, stop_id, e).await),
        };

        // El hueco se cierra en la posición que tenía la fila al borrarla
        let result = async {
            let Some(deleted) = unit.delete_stop(stop_id).await? else {
                return Ok(None);
            };
            let shifted = unit.close_gap(trip_id, deleted.position).await?;
            Ok::<_, GatewayError>(Some((deleted, shifted)))
        }
        .await;

        match result {
            Ok(Some((deleted, shifted))) => {
                unit.commit().await?;
                info!(
                    "🗑️ Parada {} eliminada del viaje {} ({} paradas desplazadas)",
                    stop_id, trip_id, shifted
                );
                Ok(deleted)
            }
            Ok(None) => {
                unit.rollback().await?;
                Err(SequencingError::StopNotFound(stop_id))
            }
            Err(e) => Err(Self::abort(unit, trip_id, e).await),
        }
    }

    /// Busca el viaje de la parada y toma su lock
    async fn locked_trip_of(unit: &mut G::Unit, stop_id: i64) -> Result<Option<i64>, GatewayError> {
        let Some(stop) = unit.find_stop(stop_id).await? else {
            return Ok(None);
        };
        unit.lock_trip(stop.trip_id).await?;
        Ok(Some(stop.trip_id))
    }

    /// Reordena por fecha todos los viajes con más de una parada.
    /// Se detiene en el primer fallo; los viajes anteriores quedan confirmados.
    pub async fn resort_all(&self) -> Result<usize, SequencingError> {
        let trip_ids = self.gateway.trips_with_multiple_stops().await?;
        let mut resorted = 0;

        for trip_id in trip_ids {
            info!("Reordenando viaje {}", trip_id);
            self.resort_by_date(trip_id).await?;
            resorted += 1;
        }

        info!("✅ {} viajes reordenados", resorted);
        Ok(resorted)
    }

    /// Renumeración en dos fases sobre `ordered`. No confirma.
    async fn renumber(unit: &mut G::Unit, trip_id: i64, ordered: &[Stop]) -> Result<(), GatewayError> {
        let ids: Vec<i64> = ordered.iter().map(|s| s.id).collect();

        debug!(trip_id, stops = ids.len(), "Fase 1: posiciones temporales");
        unit.assign_positions(trip_id, &staging_positions(&ids)).await?;

        debug!(
            trip_id,
            order = ?ordered.iter().map(|s| s.destination.as_str()).collect::<Vec<_>>(),
            "Fase 2: posiciones finales"
        );
        unit.assign_positions(trip_id, &final_positions(&ids)).await?;

        Ok(())
    }

    async fn abort(unit: G::Unit, trip_id: i64, error: GatewayError) -> SequencingError {
        warn!("❌ Error en la secuencia del viaje {}: {}", trip_id, error);
        if let Err(rollback_error) = unit.rollback().await {
            warn!("❌ Rollback fallido para el viaje {}: {}", trip_id, rollback_error);
        }
        SequencingError::Failure(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::memory::InMemoryStopGateway;
    use chrono::NaiveDate;
    use rand::seq::SliceRandom;

    const TRIP: i64 = 1;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stop(id: i64, destination: &str, arrival: NaiveDate, departure: NaiveDate) -> Stop {
        Stop {
            id,
            trip_id: TRIP,
            destination: destination.to_string(),
            position: id as i32,
            arrival_date: arrival,
            departure_date: departure,
            notes: None,
        }
    }

    fn ids(stops: &[Stop]) -> Vec<i64> {
        stops.iter().map(|s| s.id).collect()
    }

    fn assert_contiguous(gateway: &InMemoryStopGateway, trip_id: i64) {
        let positions: Vec<i32> = gateway.positions(trip_id).into_iter().map(|(_, p)| p).collect();
        let expected: Vec<i32> = (1..=positions.len() as i32).collect();
        assert_eq!(positions, expected);
    }

    /// Tres paradas en posiciones 1, 2, 3 con fechas crecientes
    fn three_stop_trip() -> (InMemoryStopGateway, Vec<i64>) {
        let gateway = InMemoryStopGateway::new();
        let a = gateway.seed(TRIP, "Quito", date(2024, 1, 1), date(2024, 1, 3), 1);
        let b = gateway.seed(TRIP, "Lima", date(2024, 1, 3), date(2024, 1, 6), 2);
        let c = gateway.seed(TRIP, "Cusco", date(2024, 1, 6), date(2024, 1, 9), 3);
        (gateway, vec![a, b, c])
    }

    #[test]
    fn test_chronological_order_uses_arrival_then_departure() {
        let mut stops = vec![
            stop(1, "Lima", date(2024, 1, 5), date(2024, 1, 7)),
            stop(2, "Cusco", date(2024, 1, 5), date(2024, 1, 6)),
            stop(3, "Quito", date(2024, 1, 1), date(2024, 1, 10)),
        ];
        chronological_order(&mut stops);
        assert_eq!(ids(&stops), vec![3, 2, 1]);
    }

    #[test]
    fn test_chronological_order_breaks_ties_by_destination_then_id() {
        let mut stops = vec![
            stop(1, "Zarate", date(2024, 2, 1), date(2024, 2, 2)),
            stop(2, "arequipa", date(2024, 2, 1), date(2024, 2, 2)),
            stop(3, "Arequipa", date(2024, 2, 1), date(2024, 2, 2)),
        ];
        chronological_order(&mut stops);
        assert_eq!(ids(&stops), vec![2, 3, 1]);
    }

    #[test]
    fn test_splice_at_clamps_target() {
        let base = vec![
            stop(1, "A", date(2024, 1, 1), date(2024, 1, 2)),
            stop(2, "B", date(2024, 1, 2), date(2024, 1, 3)),
            stop(3, "C", date(2024, 1, 3), date(2024, 1, 4)),
        ];
        assert_eq!(ids(&splice_at(base.clone(), 1, 99)), vec![2, 3, 1]);
        assert_eq!(ids(&splice_at(base.clone(), 3, 0)), vec![3, 1, 2]);
        assert_eq!(ids(&splice_at(base.clone(), 3, -5)), vec![3, 1, 2]);
        assert_eq!(ids(&splice_at(base.clone(), 1, 2)), vec![2, 1, 3]);
        assert_eq!(ids(&splice_at(base.clone(), 42, 1)), vec![1, 2, 3]);
        assert_eq!(ids(&splice_at(base, 2, i64::MIN)), vec![2, 1, 3]);
    }

    #[test]
    fn test_staging_positions_are_disjoint_from_final_ones() {
        let staging = staging_positions(&[10, 20, 30]);
        let finals = final_positions(&[10, 20, 30]);
        assert_eq!(staging.iter().map(|a| a.position).collect::<Vec<_>>(), vec![-1000, -1001, -1002]);
        assert_eq!(finals.iter().map(|a| a.position).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_resort_by_date_orders_stops() {
        let gateway = InMemoryStopGateway::new();
        let a = gateway.seed(TRIP, "Lima", date(2024, 1, 5), date(2024, 1, 7), 1);
        let b = gateway.seed(TRIP, "Cusco", date(2024, 1, 5), date(2024, 1, 6), 2);
        let c = gateway.seed(TRIP, "Quito", date(2024, 1, 1), date(2024, 1, 10), 3);

        let sequencer = Sequencer::new(gateway.clone());
        sequencer.resort_by_date(TRIP).await.unwrap();

        assert_eq!(gateway.positions(TRIP), vec![(c, 1), (b, 2), (a, 3)]);
    }

    #[tokio::test]
    async fn test_resort_by_date_destination_tie_break() {
        let gateway = InMemoryStopGateway::new();
        let zarate = gateway.seed(TRIP, "Zarate", date(2024, 3, 1), date(2024, 3, 2), 1);
        let arequipa = gateway.seed(TRIP, "Arequipa", date(2024, 3, 1), date(2024, 3, 2), 2);

        Sequencer::new(gateway.clone()).resort_by_date(TRIP).await.unwrap();

        assert_eq!(gateway.order_of(TRIP), vec![arequipa, zarate]);
    }

    #[tokio::test]
    async fn test_resort_by_date_is_deterministic_from_any_start() {
        let mut positions: Vec<i32> = vec![5, 17, 2, 9, 300, 41];
        positions.shuffle(&mut rand::thread_rng());

        let gateway = InMemoryStopGateway::new();
        let destinations = ["Puno", "Lima", "Cusco", "Ica", "Nazca", "Arica"];
        for (i, (destination, position)) in destinations.iter().zip(positions).enumerate() {
            let day = 1 + (i as u32 % 3);
            gateway.seed(TRIP, destination, date(2024, 4, day), date(2024, 4, day + 1), position);
        }
        let other = gateway.seed(2, "Bogotá", date(2024, 4, 1), date(2024, 4, 2), 1);

        let sequencer = Sequencer::new(gateway.clone());
        sequencer.resort_by_date(TRIP).await.unwrap();
        let first = gateway.positions(TRIP);
        sequencer.resort_by_date(TRIP).await.unwrap();

        assert_eq!(gateway.positions(TRIP), first);
        assert_contiguous(&gateway, TRIP);
        assert_eq!(gateway.positions(2), vec![(other, 1)]);
    }

    #[tokio::test]
    async fn test_resort_by_date_single_or_empty_trip_writes_nothing() {
        let gateway = InMemoryStopGateway::new();
        let only = gateway.seed(TRIP, "Lima", date(2024, 1, 1), date(2024, 1, 2), 7);
        let sequencer = Sequencer::new(gateway.clone());

        sequencer.resort_by_date(TRIP).await.unwrap();
        sequencer.resort_by_date(99).await.unwrap();

        assert_eq!(gateway.position_writes(), 0);
        assert_eq!(gateway.positions(TRIP), vec![(only, 7)]);
    }

    #[tokio::test]
    async fn test_resort_by_date_survives_swapped_positions() {
        // Sin la fase temporal, escribir 1 sobre la parada que ocupa el 2
        // chocaría con la restricción única.
        let gateway = InMemoryStopGateway::new();
        let late = gateway.seed(TRIP, "Lima", date(2024, 1, 9), date(2024, 1, 10), 1);
        let early = gateway.seed(TRIP, "Quito", date(2024, 1, 1), date(2024, 1, 2), 2);

        Sequencer::new(gateway.clone()).resort_by_date(TRIP).await.unwrap();

        assert_eq!(gateway.positions(TRIP), vec![(early, 1), (late, 2)]);
    }

    #[tokio::test]
    async fn test_resort_by_date_rolls_back_on_phase_two_failure() {
        let gateway = InMemoryStopGateway::new();
        let a = gateway.seed(TRIP, "Lima", date(2024, 1, 9), date(2024, 1, 10), 1);
        let b = gateway.seed(TRIP, "Quito", date(2024, 1, 1), date(2024, 1, 2), 2);
        let before = gateway.positions(TRIP);
        gateway.fail_on_assign(2);

        let err = Sequencer::new(gateway.clone()).resort_by_date(TRIP).await.unwrap_err();

        assert!(matches!(err, SequencingError::Failure(GatewayError::Backend(_))));
        assert!(err.to_string().contains("simulated connection loss"));
        assert_eq!(gateway.positions(TRIP), before);
        assert_eq!(before, vec![(a, 1), (b, 2)]);
    }

    #[tokio::test]
    async fn test_move_stop_clamps_past_the_end() {
        let (gateway, ids) = three_stop_trip();

        Sequencer::new(gateway.clone()).move_stop(ids[0], 99).await.unwrap();

        assert_eq!(gateway.positions(TRIP), vec![(ids[1], 1), (ids[2], 2), (ids[0], 3)]);
    }

    #[tokio::test]
    async fn test_move_stop_to_front_and_middle() {
        let (gateway, ids) = three_stop_trip();
        let sequencer = Sequencer::new(gateway.clone());

        sequencer.move_stop(ids[2], 0).await.unwrap();
        assert_eq!(gateway.order_of(TRIP), vec![ids[2], ids[0], ids[1]]);

        sequencer.move_stop(ids[2], 2).await.unwrap();
        assert_eq!(gateway.order_of(TRIP), vec![ids[0], ids[2], ids[1]]);
        assert_contiguous(&gateway, TRIP);
    }

    #[tokio::test]
    async fn test_move_stop_to_current_position_is_a_no_op() {
        let (gateway, ids) = three_stop_trip();

        Sequencer::new(gateway.clone()).move_stop(ids[1], 2).await.unwrap();

        assert_eq!(gateway.position_writes(), 0);
    }

    #[tokio::test]
    async fn test_move_stop_unknown_stop_is_not_found() {
        let (gateway, _) = three_stop_trip();

        let err = Sequencer::new(gateway.clone()).move_stop(404, 1).await.unwrap_err();

        assert!(matches!(err, SequencingError::StopNotFound(404)));
        assert_eq!(gateway.position_writes(), 0);
    }

    #[tokio::test]
    async fn test_move_stop_rolls_back_on_phase_two_failure() {
        let (gateway, ids) = three_stop_trip();
        let before = gateway.positions(TRIP);
        gateway.fail_on_assign(2);

        let result = Sequencer::new(gateway.clone()).move_stop(ids[0], 3).await;

        assert!(result.is_err());
        assert_eq!(gateway.positions(TRIP), before);
    }

    #[tokio::test]
    async fn test_move_then_resort_restores_date_order() {
        let (gateway, ids) = three_stop_trip();
        let sequencer = Sequencer::new(gateway.clone());

        sequencer.move_stop(ids[0], 3).await.unwrap();
        assert_eq!(gateway.order_of(TRIP), vec![ids[1], ids[2], ids[0]]);

        sequencer.resort_by_date(TRIP).await.unwrap();
        assert_eq!(gateway.order_of(TRIP), ids);
    }

    #[tokio::test]
    async fn test_remove_stop_closes_gap() {
        let (gateway, ids) = four_stop_trip();

        let removed = Sequencer::new(gateway.clone()).remove_stop(ids[1]).await.unwrap();

        assert_eq!(removed.position, 2);
        assert_eq!(gateway.positions(TRIP), vec![(ids[0], 1), (ids[2], 2), (ids[3], 3)]);
    }

    #[tokio::test]
    async fn test_remove_stop_unknown_stop_is_not_found() {
        let (gateway, _) = three_stop_trip();

        let err = Sequencer::new(gateway).remove_stop(12345).await.unwrap_err();

        assert!(matches!(err, SequencingError::StopNotFound(12345)));
    }

    /// Cuatro paradas en posiciones 1..4
    fn four_stop_trip() -> (InMemoryStopGateway, Vec<i64>) {
        let gateway = InMemoryStopGateway::new();
        let ids = (1..=4)
            .map(|p| gateway.seed(TRIP, &format!("Stop {p}"), date(2024, 1, p), date(2024, 1, p + 1), p as i32))
            .collect();
        (gateway, ids)
    }

    #[tokio::test]
    async fn test_remove_stop_uses_position_committed_while_waiting_for_lock() {
        let (gateway, ids) = four_stop_trip();
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        // Otra transacción mueve `a` al final antes de que se conceda el lock
        gateway.commit_before_next_lock(move |stops| {
            for (id, position) in [(b, 1), (c, 2), (d, 3), (a, 4)] {
                if let Some(stop) = stops.get_mut(&id) {
                    stop.position = position;
                }
            }
        });

        let removed = Sequencer::new(gateway.clone()).remove_stop(a).await.unwrap();

        assert_eq!(removed.position, 4);
        assert_eq!(gateway.positions(TRIP), vec![(b, 1), (c, 2), (d, 3)]);
    }

    #[tokio::test]
    async fn test_remove_stop_deleted_while_waiting_for_lock_is_not_found() {
        let (gateway, ids) = four_stop_trip();
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        gateway.commit_before_next_lock(move |stops| {
            stops.remove(&a);
            for (id, position) in [(b, 1), (c, 2), (d, 3)] {
                if let Some(stop) = stops.get_mut(&id) {
                    stop.position = position;
                }
            }
        });

        let err = Sequencer::new(gateway.clone()).remove_stop(a).await.unwrap_err();

        assert!(matches!(err, SequencingError::StopNotFound(id) if id == a));
        assert_eq!(gateway.positions(TRIP), vec![(b, 1), (c, 2), (d, 3)]);
    }

    #[tokio::test]
    async fn test_move_stop_rechecks_position_after_lock() {
        let (gateway, ids) = three_stop_trip();
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        // `b` estaba en 2 al leerla, pero otra transacción la lleva al frente
        gateway.commit_before_next_lock(move |stops| {
            for (id, position) in [(b, 1), (a, 2), (c, 3)] {
                if let Some(stop) = stops.get_mut(&id) {
                    stop.position = position;
                }
            }
        });

        Sequencer::new(gateway.clone()).move_stop(b, 2).await.unwrap();

        assert_eq!(gateway.positions(TRIP), vec![(a, 1), (b, 2), (c, 3)]);
    }

    #[tokio::test]
    async fn test_resort_all_counts_trips_with_several_stops() {
        let gateway = InMemoryStopGateway::new();
        gateway.seed(1, "Lima", date(2024, 1, 9), date(2024, 1, 10), 1);
        gateway.seed(1, "Quito", date(2024, 1, 1), date(2024, 1, 2), 2);
        gateway.seed(2, "Cusco", date(2024, 1, 1), date(2024, 1, 2), 1);
        gateway.seed(3, "Puno", date(2024, 2, 1), date(2024, 2, 2), 5);
        gateway.seed(3, "Arica", date(2024, 2, 3), date(2024, 2, 4), 9);

        let resorted = Sequencer::new(gateway.clone()).resort_all().await.unwrap();

        assert_eq!(resorted, 2);
        assert_contiguous(&gateway, 1);
        assert_contiguous(&gateway, 3);
    }
}
