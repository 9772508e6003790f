//! Tests for /, /health and /airports

use axum::http::StatusCode;

use super::*;
use crate::adapters::outbound::messaging::ObserverConnection;

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_router();
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_system_info() {
    let (app, state) = create_test_router();
    let (conn, _rx) = ObserverConnection::new(4);
    state.broadcaster.register(conn).await.unwrap();

    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["system"], "Drone Dispatch Server");
    assert_eq!(body["status"], "online");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["connections"], 1);
    assert_eq!(
        body["airports"],
        serde_json::json!(["顶好大厦", "创投大厦", "怡丰昌盛"])
    );
}

#[tokio::test]
async fn test_list_airports() {
    let (app, _) = create_test_router();
    let (status, body) = send(app, get("/airports")).await;

    assert_eq!(status, StatusCode::OK);
    let airports = body.as_array().unwrap();
    assert_eq!(airports.len(), 3);
    assert_eq!(airports[0]["id"], "DH");
    assert_eq!(airports[0]["lat"], 22.9944);
    assert_eq!(airports[0]["lng"], 113.7258);
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = create_test_router();
    let (status, _) = send(app, get("/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
