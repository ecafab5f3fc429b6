//! Gateway en memoria para tests del motor de secuencia
//!
//! Reproduce lo que importa de PostgreSQL: la restricción única
//! `(trip_id, orden)` comprobada fila a fila, escrituras invisibles hasta el
//! commit, rollback al descartar la unidad y lecturas READ COMMITTED tras
//! tomar el lock del viaje. Permite además simular un fallo en la n-ésima
//! escritura de posiciones y una transacción concurrente que confirma
//! mientras se espera el lock.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::gateway::{GatewayError, PositionAssignment, StopGateway, UnitOfWork};
use crate::models::stop::Stop;

type ConcurrentCommit = Box<dyn FnOnce(&mut BTreeMap<i64, Stop>) + Send>;

#[derive(Default)]
struct MemoryState {
    stops: BTreeMap<i64, Stop>,
    next_id: i64,
    position_writes: usize,
    assign_calls: usize,
    fail_on_assign: Option<usize>,
    commit_before_lock: Option<ConcurrentCommit>,
}

#[derive(Clone, Default)]
pub struct InMemoryStopGateway {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStopGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    /// Inserta una parada ya confirmada y devuelve su id
    pub fn seed(
        &self,
        trip_id: i64,
        destination: &str,
        arrival: NaiveDate,
        departure: NaiveDate,
        position: i32,
    ) -> i64 {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.stops.insert(
            id,
            Stop {
                id,
                trip_id,
                destination: destination.to_string(),
                position,
                arrival_date: arrival,
                departure_date: departure,
                notes: None,
            },
        );
        id
    }

    /// Ids de las paradas del viaje ordenados por posición confirmada
    pub fn order_of(&self, trip_id: i64) -> Vec<i64> {
        self.positions(trip_id).into_iter().map(|(id, _)| id).collect()
    }

    /// (id, posición) confirmados, ordenados por posición
    pub fn positions(&self, trip_id: i64) -> Vec<(i64, i32)> {
        let state = self.lock();
        let mut rows: Vec<(i64, i32)> = state
            .stops
            .values()
            .filter(|s| s.trip_id == trip_id)
            .map(|s| (s.id, s.position))
            .collect();
        rows.sort_by_key(|&(id, position)| (position, id));
        rows
    }

    /// Filas de posición escritas en cualquier transacción
    pub fn position_writes(&self) -> usize {
        self.lock().position_writes
    }

    /// Hace fallar la n-ésima llamada (1-indexada) a `assign_positions`
    pub fn fail_on_assign(&self, call: usize) {
        let mut state = self.lock();
        state.fail_on_assign = Some(state.assign_calls + call);
    }

    /// Aplica `write` sobre el estado confirmado la próxima vez que una
    /// unidad pida el lock de un viaje, antes de concedérselo
    pub fn commit_before_next_lock(&self, write: impl FnOnce(&mut BTreeMap<i64, Stop>) + Send + 'static) {
        self.lock().commit_before_lock = Some(Box::new(write));
    }
}

#[async_trait]
impl StopGateway for InMemoryStopGateway {
    type Unit = InMemoryUnitOfWork;

    async fn begin(&self) -> Result<InMemoryUnitOfWork, GatewayError> {
        let staged = self.lock().stops.clone();
        Ok(InMemoryUnitOfWork {
            gateway: self.clone(),
            staged,
        })
    }

    async fn trips_with_multiple_stops(&self) -> Result<Vec<i64>, GatewayError> {
        let state = self.lock();
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for stop in state.stops.values() {
            *counts.entry(stop.trip_id).or_default() += 1;
        }
        Ok(counts.into_iter().filter(|&(_, n)| n > 1).map(|(id, _)| id).collect())
    }
}

pub struct InMemoryUnitOfWork {
    gateway: InMemoryStopGateway,
    staged: BTreeMap<i64, Stop>,
}

impl InMemoryUnitOfWork {
    fn position_taken(&self, trip_id: i64, stop_id: i64, position: i32) -> bool {
        self.staged
            .values()
            .any(|s| s.trip_id == trip_id && s.id != stop_id && s.position == position)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn lock_trip(&mut self, trip_id: i64) -> Result<(), GatewayError> {
        let mut state = self.gateway.lock();
        if let Some(write) = state.commit_before_lock.take() {
            write(&mut state.stops);
        }

        self.staged.retain(|_, s| s.trip_id != trip_id);
        self.staged.extend(
            state
                .stops
                .values()
                .filter(|s| s.trip_id == trip_id)
                .map(|s| (s.id, s.clone())),
        );
        Ok(())
    }

    async fn find_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError> {
        Ok(self.staged.get(&stop_id).cloned())
    }

    async fn trip_stops(&mut self, trip_id: i64) -> Result<Vec<Stop>, GatewayError> {
        let mut stops: Vec<Stop> = self.staged.values().filter(|s| s.trip_id == trip_id).cloned().collect();
        stops.sort_by_key(|s| (s.position, s.id));
        Ok(stops)
    }

    async fn assign_positions(
        &mut self,
        trip_id: i64,
        assignments: &[PositionAssignment],
    ) -> Result<(), GatewayError> {
        {
            let mut state = self.gateway.lock();
            state.assign_calls += 1;
            if state.fail_on_assign == Some(state.assign_calls) {
                return Err(GatewayError::Backend("simulated connection loss".to_string()));
            }
        }

        for assignment in assignments {
            if self.position_taken(trip_id, assignment.stop_id, assignment.position) {
                return Err(GatewayError::PositionConflict {
                    trip_id,
                    position: assignment.position,
                });
            }
            let stop = self
                .staged
                .get_mut(&assignment.stop_id)
                .filter(|s| s.trip_id == trip_id)
                .ok_or_else(|| GatewayError::Backend(format!("stop {} not in trip {}", assignment.stop_id, trip_id)))?;
            stop.position = assignment.position;
            self.gateway.lock().position_writes += 1;
        }

        Ok(())
    }

    async fn delete_stop(&mut self, stop_id: i64) -> Result<Option<Stop>, GatewayError> {
        Ok(self.staged.remove(&stop_id))
    }

    async fn close_gap(&mut self, trip_id: i64, removed_position: i32) -> Result<u64, GatewayError> {
        let mut shifted = 0;
        for stop in self.staged.values_mut() {
            if stop.trip_id == trip_id && stop.position > removed_position {
                stop.position -= 1;
                shifted += 1;
            }
        }
        self.gateway.lock().position_writes += shifted as usize;

        // La restricción única se comprueba al final de la sentencia
        let mut seen = BTreeSet::new();
        for stop in self.staged.values().filter(|s| s.trip_id == trip_id) {
            if !seen.insert(stop.position) {
                return Err(GatewayError::PositionConflict {
                    trip_id,
                    position: stop.position,
                });
            }
        }

        Ok(shifted)
    }

    async fn commit(self) -> Result<(), GatewayError> {
        self.gateway.lock().stops = self.staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), GatewayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_close_gap_rejects_duplicate_positions() {
        let gateway = InMemoryStopGateway::new();
        for p in 1..=3 {
            gateway.seed(1, "Lima", date(p), date(p + 1), p as i32);
        }

        // Sin borrar la parada 1, bajar las mayores deja dos paradas en 1
        let mut unit = gateway.begin().await.unwrap();
        let err = unit.close_gap(1, 1).await.unwrap_err();

        assert!(matches!(err, GatewayError::PositionConflict { trip_id: 1, position: 1 }));
    }

    #[tokio::test]
    async fn test_lock_trip_sees_concurrent_commit() {
        let gateway = InMemoryStopGateway::new();
        let id = gateway.seed(1, "Lima", date(1), date(2), 1);
        let mut unit = gateway.begin().await.unwrap();
        gateway.commit_before_next_lock(move |stops| {
            if let Some(stop) = stops.get_mut(&id) {
                stop.position = 5;
            }
        });

        assert_eq!(unit.find_stop(id).await.unwrap().unwrap().position, 1);
        unit.lock_trip(1).await.unwrap();
        assert_eq!(unit.find_stop(id).await.unwrap().unwrap().position, 5);
    }
}
