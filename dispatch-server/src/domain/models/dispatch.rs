use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::LaunchSite;
use crate::domain::services::eta::format_eta;

/// Outcome category of a dispatch decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Success,
    Rejected,
    Error,
}

impl DispatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Success => "success",
            DispatchStatus::Rejected => "rejected",
            DispatchStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated flight time from the launch site to the target
#[derive(Debug, Clone, PartialEq)]
pub struct Eta {
    pub travel_time: Duration,
    /// User-facing rendering, e.g. "2 hours 5 minutes"
    pub formatted: String,
}

impl Eta {
    pub fn new(travel_time: Duration) -> Self {
        Self {
            formatted: format_eta(travel_time),
            travel_time,
        }
    }
}

/// Decision produced by the planner for one mission command
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub status: DispatchStatus,
    pub message: String,
    pub selected_site: Option<LaunchSite>,
    pub distance_km: Option<f64>,
    pub eta: Option<Eta>,
    pub created_at: DateTime<Utc>,
}

impl DispatchResult {
    pub fn success(site: LaunchSite, distance_km: f64, eta: Eta) -> Self {
        Self {
            status: DispatchStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            selected_site: Some(site),
            distance_km: Some(distance_km),
            eta: Some(eta),
            created_at: Utc::now(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::without_site(DispatchStatus::Rejected, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::without_site(DispatchStatus::Error, message.into())
    }

    fn without_site(status: DispatchStatus, message: String) -> Self {
        Self {
            status,
            message,
            selected_site: None,
            distance_km: None,
            eta: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Success
    }

    /// Formatted ETA, empty for rejected and failed decisions
    pub fn eta_text(&self) -> &str {
        self.eta.as_ref().map(|eta| eta.formatted.as_str()).unwrap_or("")
    }
}

pub const SUCCESS_MESSAGE: &str = "Command executed successfully";
