use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Task type assumed when the request does not name one
pub const DEFAULT_TASK_TYPE: &str = "patrol";

/// A single normalized request to dispatch a mission toward a target.
///
/// Lives only for the duration of one dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionCommand {
    pub mission_id: String,
    pub task_type: String,
    pub target: Coordinate,
}

/// Flight phases every mission goes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightPhase {
    Takeoff,
    Climb,
    Cruise,
    Land,
}

impl FlightPhase {
    pub const SEQUENCE: [FlightPhase; 4] = [
        FlightPhase::Takeoff,
        FlightPhase::Climb,
        FlightPhase::Cruise,
        FlightPhase::Land,
    ];
}
