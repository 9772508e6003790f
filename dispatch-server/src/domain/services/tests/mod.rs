//! Tests for the dispatch decision services
//!
//! Shared fixtures for resolver and planner tests.


use std::sync::Arc;

use crate::domain::models::{Coordinate, MissionCommand};
use crate::domain::services::{AllowAll, DispatchPlanner, LaunchSiteRegistry, PlannerSettings};

/// Target a few tens of metres from the DH reference site
pub(crate) const NEAR_DH: Coordinate = Coordinate::new(22.9950, 113.7260);

pub(crate) fn create_test_command(target: Coordinate) -> MissionCommand {
    MissionCommand {
        mission_id: "TEST_MISSION".to_string(),
        task_type: "patrol".to_string(),
        target,
    }
}

/// Planner over the reference registry that admits everything
pub(crate) fn create_reference_planner() -> DispatchPlanner {
    DispatchPlanner::new(
        Arc::new(LaunchSiteRegistry::reference()),
        Arc::new(AllowAll),
        PlannerSettings::default(),
    )
    .expect("default settings are valid")
}
