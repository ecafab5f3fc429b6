//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::sequencing::{PgStopGateway, Sequencer, StopSequencer};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub sequencer: Arc<StopSequencer>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let sequencer = Arc::new(Sequencer::new(PgStopGateway::new(pool.clone())));
        Self {
            pool,
            config,
            sequencer,
        }
    }
}
