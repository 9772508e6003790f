use std::sync::Arc;

use crate::domain::errors::DispatchError;
use crate::domain::models::{DispatchResult, Eta, MissionCommand};
use crate::domain::services::eta::{travel_time, DEFAULT_CRUISE_SPEED_MS};
use crate::domain::services::site_registry::LaunchSiteRegistry;
use crate::ports::AdmissionPolicy;

/// Message returned when the admission policy declines a mission
pub const REJECTED_MESSAGE: &str = "Mission rejected by admission control";

/// Default maximum distance between launch site and target
pub const DEFAULT_MAX_FLIGHT_DISTANCE_KM: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
    /// Cruise speed used for ETA estimation (m/s)
    pub cruise_speed_ms: f64,
    /// Range limit from the selected site; 0 disables the check
    pub max_flight_distance_km: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            cruise_speed_ms: DEFAULT_CRUISE_SPEED_MS,
            max_flight_distance_km: DEFAULT_MAX_FLIGHT_DISTANCE_KM,
        }
    }
}

impl PlannerSettings {
    fn validate(&self) -> Result<(), DispatchError> {
        if !self.cruise_speed_ms.is_finite() || self.cruise_speed_ms <= 0.0 {
            return Err(DispatchError::InvalidSettings(format!(
                "cruise_speed_ms must be positive, got {}",
                self.cruise_speed_ms
            )));
        }
        if !self.max_flight_distance_km.is_finite() || self.max_flight_distance_km < 0.0 {
            return Err(DispatchError::InvalidSettings(format!(
                "max_flight_distance_km must be zero or positive, got {}",
                self.max_flight_distance_km
            )));
        }
        Ok(())
    }
}

/// Picks a launch site for a mission and estimates its arrival time
pub struct DispatchPlanner {
    registry: Arc<LaunchSiteRegistry>,
    admission: Arc<dyn AdmissionPolicy>,
    settings: PlannerSettings,
}

impl DispatchPlanner {
    pub fn new(
        registry: Arc<LaunchSiteRegistry>,
        admission: Arc<dyn AdmissionPolicy>,
        settings: PlannerSettings,
    ) -> Result<Self, DispatchError> {
        settings.validate()?;
        Ok(Self {
            registry,
            admission,
            settings,
        })
    }

    pub fn plan(&self, command: &MissionCommand) -> DispatchResult {
        if !self
            .admission
            .is_admissible(&command.target, &command.task_type)
        {
            tracing::warn!(
                mission_id = %command.mission_id,
                task_type = %command.task_type,
                "Mission rejected by admission policy"
            );
            return DispatchResult::rejected(REJECTED_MESSAGE);
        }

        let (site, distance_km) = self.registry.nearest(&command.target);

        let limit = self.settings.max_flight_distance_km;
        if limit > 0.0 && distance_km > limit {
            tracing::warn!(
                mission_id = %command.mission_id,
                site = %site.identifier,
                distance_km,
                limit_km = limit,
                "Target beyond flight range"
            );
            return DispatchResult::rejected(format!(
                "Target is {:.1} km from the nearest launch site, beyond the {:.1} km flight range",
                distance_km, limit
            ));
        }

        let eta = Eta::new(travel_time(distance_km, self.settings.cruise_speed_ms));

        tracing::info!(
            mission_id = %command.mission_id,
            site = %site.identifier,
            distance_km,
            eta = %eta.formatted,
            "Launch site selected"
        );

        DispatchResult::success(site.clone(), distance_km, eta)
    }

    pub fn registry(&self) -> &LaunchSiteRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }
}
