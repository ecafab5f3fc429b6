use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub const APP_NAME: &str = "trip-itinerary";

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "app": APP_NAME,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn ping() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "pong",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
