//! Liveness, system summary and launch site listing

use axum::{extract::State, Json};
use chrono::Utc;

use super::dtos::{AirportView, HealthResponse, SystemInfoResponse};
use super::AppState;

pub const SYSTEM_NAME: &str = "Drone Dispatch Server";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn system_info(State(state): State<AppState>) -> Json<SystemInfoResponse> {
    let airports = state
        .service
        .registry()
        .sites()
        .iter()
        .map(|site| site.name.clone())
        .collect();

    Json(SystemInfoResponse {
        system: SYSTEM_NAME.to_string(),
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connections: state.broadcaster.observer_count().await,
        airports,
    })
}

pub async fn list_airports(State(state): State<AppState>) -> Json<Vec<AirportView>> {
    Json(
        state
            .service
            .registry()
            .sites()
            .iter()
            .map(AirportView::from)
            .collect(),
    )
}
