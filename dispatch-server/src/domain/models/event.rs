use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinate, DispatchResult, FlightPhase, MissionCommand};

/// Event pushed to every connected observer.
///
/// Wire format: `{"event": "flight_start", "payload": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum DispatchEvent {
    FlightStart(FlightStartPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStartPayload {
    pub mission_id: String,
    pub selected_site_id: String,
    pub selected_site_name: String,
    pub site_coordinates: Coordinate,
    pub target_coordinates: Coordinate,
    pub task_type: String,
    pub distance_km: f64,
    pub eta: String,
    pub flight_phases: Vec<FlightPhase>,
    pub timestamp: DateTime<Utc>,
}

impl DispatchEvent {
    /// Build the flight-start announcement for a successful decision.
    /// Returns None when the result selected no site.
    pub fn flight_start(command: &MissionCommand, result: &DispatchResult) -> Option<Self> {
        if !result.is_success() {
            return None;
        }
        let site = result.selected_site.as_ref()?;

        Some(DispatchEvent::FlightStart(FlightStartPayload {
            mission_id: command.mission_id.clone(),
            selected_site_id: site.identifier.clone(),
            selected_site_name: site.name.clone(),
            site_coordinates: site.location,
            target_coordinates: command.target,
            task_type: command.task_type.clone(),
            distance_km: result.distance_km.unwrap_or_default(),
            eta: result.eta_text().to_string(),
            flight_phases: FlightPhase::SEQUENCE.to_vec(),
            timestamp: result.created_at,
        }))
    }

    pub fn mission_id(&self) -> &str {
        match self {
            DispatchEvent::FlightStart(payload) => &payload.mission_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Eta, LaunchSite};
    use std::time::Duration;

    fn command() -> MissionCommand {
        MissionCommand {
            mission_id: "M-1".to_string(),
            task_type: "patrol".to_string(),
            target: Coordinate::new(22.9950, 113.7260),
        }
    }

    #[test]
    fn test_flight_start_wire_format() {
        let site = LaunchSite::new("DH", "顶好大厦", Coordinate::new(22.9944, 113.7258));
        let result = DispatchResult::success(site, 0.07, Eta::new(Duration::from_secs(6)));

        let event = DispatchEvent::flight_start(&command(), &result).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "flight_start");
        assert_eq!(json["payload"]["mission_id"], "M-1");
        assert_eq!(json["payload"]["selected_site_id"], "DH");
        assert_eq!(json["payload"]["target_coordinates"]["lat"], 22.9950);
        assert_eq!(json["payload"]["eta"], "1 minute");
        assert_eq!(
            json["payload"]["flight_phases"],
            serde_json::json!(["TAKEOFF", "CLIMB", "CRUISE", "LAND"])
        );
        assert!(json["payload"]["timestamp"].is_string());
    }

    #[test]
    fn test_no_event_for_rejected_result() {
        let result = DispatchResult::rejected("no");
        assert!(DispatchEvent::flight_start(&command(), &result).is_none());
    }
}
