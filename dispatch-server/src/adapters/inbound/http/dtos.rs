use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::LaunchSite;

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Response body for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfoResponse {
    pub system: String,
    pub status: String,
    pub version: String,
    /// Live WebSocket observers
    pub connections: usize,
    /// Launch site names in registration order
    pub airports: Vec<String>,
}

/// One entry of `GET /airports`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportView {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&LaunchSite> for AirportView {
    fn from(site: &LaunchSite) -> Self {
        Self {
            id: site.identifier.clone(),
            name: site.name.clone(),
            lat: site.location.latitude,
            lng: site.location.longitude,
        }
    }
}
