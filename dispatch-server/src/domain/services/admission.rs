// Admission policies for the dispatch planner.
//
// AllowAll is the reference behaviour. RegionFence and NoFlyZones are enabled
// from the [admission] config section and combined through PolicyChain.

use std::sync::Arc;

use crate::domain::models::{Coordinate, NoFlyZone, RegionBounds};
use crate::ports::AdmissionPolicy;

/// Admits every mission
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AdmissionPolicy for AllowAll {
    fn is_admissible(&self, _target: &Coordinate, _task_type: &str) -> bool {
        true
    }
}

/// Admits only targets inside the operating region
#[derive(Debug, Clone)]
pub struct RegionFence {
    bounds: RegionBounds,
}

impl RegionFence {
    pub fn new(bounds: RegionBounds) -> Self {
        Self { bounds }
    }
}

impl AdmissionPolicy for RegionFence {
    fn is_admissible(&self, target: &Coordinate, task_type: &str) -> bool {
        let inside = self.bounds.contains(target);
        if !inside {
            tracing::info!(
                coordinate = %target,
                task_type = %task_type,
                "Target outside operating region"
            );
        }
        inside
    }
}

/// Refuses targets inside any configured no-fly zone
#[derive(Debug, Clone, Default)]
pub struct NoFlyZones {
    zones: Vec<NoFlyZone>,
}

impl NoFlyZones {
    pub fn new(zones: Vec<NoFlyZone>) -> Self {
        Self { zones }
    }
}

impl AdmissionPolicy for NoFlyZones {
    fn is_admissible(&self, target: &Coordinate, task_type: &str) -> bool {
        match self.zones.iter().find(|zone| zone.contains(target)) {
            Some(zone) => {
                tracing::info!(
                    coordinate = %target,
                    task_type = %task_type,
                    zone = %zone.name,
                    "Target inside no-fly zone"
                );
                false
            }
            None => true,
        }
    }
}

/// Admits only when every member policy admits; stops at the first refusal
#[derive(Clone, Default)]
pub struct PolicyChain {
    policies: Vec<Arc<dyn AdmissionPolicy>>,
}

impl PolicyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, policy: Arc<dyn AdmissionPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl AdmissionPolicy for PolicyChain {
    fn is_admissible(&self, target: &Coordinate, task_type: &str) -> bool {
        self.policies
            .iter()
            .all(|policy| policy.is_admissible(target, task_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockAdmissionPolicy;

    const TARGET: Coordinate = Coordinate::new(22.9950, 113.7260);

    #[test]
    fn test_allow_all() {
        assert!(AllowAll.is_admissible(&TARGET, "patrol"));
        assert!(AllowAll.is_admissible(&Coordinate::new(-33.0, 151.0), "rescue"));
    }

    #[test]
    fn test_region_fence() {
        let fence = RegionFence::new(RegionBounds::default());
        assert!(fence.is_admissible(&TARGET, "patrol"));
        // Guangzhou lies west of the Dongguan box
        assert!(!fence.is_admissible(&Coordinate::new(23.1291, 113.2644), "patrol"));
    }

    #[test]
    fn test_no_fly_zones() {
        let policy = NoFlyZones::new(vec![NoFlyZone {
            name: "stadium".to_string(),
            lat: 22.9944,
            lng: 113.7258,
            radius_km: 0.5,
        }]);
        assert!(!policy.is_admissible(&TARGET, "patrol"));
        assert!(policy.is_admissible(&Coordinate::new(22.9242, 113.8401), "patrol"));
        assert!(NoFlyZones::default().is_admissible(&TARGET, "patrol"));
    }

    #[test]
    fn test_empty_chain_admits() {
        let chain = PolicyChain::new();
        assert!(chain.is_empty());
        assert!(chain.is_admissible(&TARGET, "patrol"));
    }

    #[test]
    fn test_chain_short_circuits_on_first_refusal() {
        let mut refuse = MockAdmissionPolicy::new();
        refuse.expect_is_admissible().times(1).return_const(false);
        let mut never_called = MockAdmissionPolicy::new();
        never_called.expect_is_admissible().times(0);

        let chain = PolicyChain::new()
            .with(Arc::new(AllowAll))
            .with(Arc::new(refuse))
            .with(Arc::new(never_called));

        assert_eq!(chain.len(), 3);
        assert!(!chain.is_admissible(&TARGET, "patrol"));
    }
}
