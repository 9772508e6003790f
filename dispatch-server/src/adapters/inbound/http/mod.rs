//! HTTP adapter for the dispatch server
//!
//! Exposes the drone command endpoint, the observer WebSocket and the
//! status endpoints. Includes CORS configuration and request tracing.

mod command;
mod dtos;
mod status;
mod websocket;

#[cfg(test)]
mod tests;

pub use dtos::{AirportView, HealthResponse, SystemInfoResponse};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::adapters::outbound::messaging::EventBroadcaster;
use crate::application::DispatchService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DispatchService>,
    pub broadcaster: EventBroadcaster,
    pub allowed_origins: Vec<String>,
    pub cors_disabled: bool,
    pub config: Arc<Config>,
}

pub fn create_router(state: AppState) -> Router {
    // Create CORS layer - either permissive (all origins) or restricted based on config
    let cors = if state.cors_disabled {
        tracing::warn!("CORS is DISABLED - allowing all origins");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(
                state
                    .allowed_origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };

    // Create HTTP tracing layer for request/response logging
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                "HTTP request started"
            );
        })
        .on_response(
            DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/", get(status::system_info))
        .route("/health", get(status::health))
        .route("/airports", get(status::list_airports))
        .route("/drone/command", post(command::submit_command))
        .route("/ws", get(websocket::websocket_handler))
        .layer(trace_layer)
        .layer(cors)
        // Handler panics become 500 responses
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
