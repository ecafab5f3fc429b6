//! Rutas HTTP
//!
//! Cada módulo expone un `create_*_router()`; `create_router` los monta bajo
//! `/api` junto con los endpoints de salud.

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

pub mod activity_routes;
pub mod document_routes;
pub mod expense_routes;
pub mod health_routes;
pub mod lodging_routes;
pub mod stop_routes;
pub mod transport_routes;
pub mod trip_routes;

/// Tiempo máximo por request antes de responder 408
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(trip_routes::create_trip_router())
        .merge(stop_routes::create_stop_router())
        .merge(expense_routes::create_expense_router())
        .merge(activity_routes::create_activity_router())
        .merge(document_routes::create_document_router())
        .merge(transport_routes::create_transport_router())
        .merge(lodging_routes::create_lodging_router())
}

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api", create_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}
