//! Router tests for the HTTP adapter
//!
//! Requests are driven through `create_router` with `tower::ServiceExt::oneshot`.

mod status_tests;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::{create_router, AppState};
use crate::adapters::outbound::messaging::EventBroadcaster;
use crate::application::DispatchService;
use crate::config::Config;
use crate::domain::services::{
    AllowAll, CoordinateResolver, DispatchPlanner, LaunchSiteRegistry, PlannerSettings,
};
use crate::ports::AdmissionPolicy;

/// AppState over the reference registry; events go straight to the broadcaster
pub(crate) fn create_test_app_state(admission: Arc<dyn AdmissionPolicy>) -> AppState {
    let broadcaster = EventBroadcaster::default();
    let planner = DispatchPlanner::new(
        Arc::new(LaunchSiteRegistry::reference()),
        admission,
        PlannerSettings::default(),
    )
    .unwrap();
    let service = DispatchService::new(
        CoordinateResolver::default(),
        planner,
        Arc::new(broadcaster.clone()),
    );

    AppState {
        service: Arc::new(service),
        broadcaster,
        allowed_origins: vec![],
        cors_disabled: true,
        config: Arc::new(Config::default()),
    }
}

pub(crate) fn create_test_router() -> (Router, AppState) {
    let state = create_test_app_state(Arc::new(AllowAll));
    (create_router(state.clone()), state)
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub(crate) fn post_command(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/drone/command")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
