use std::collections::HashSet;

use crate::domain::errors::DispatchError;
use crate::domain::geo::distance_km;
use crate::domain::models::{reference_sites, Coordinate, LaunchSite};

/// Fixed set of launch sites, loaded once at startup and read-only afterwards.
///
/// Never empty: construction from an empty list fails.
#[derive(Debug, Clone)]
pub struct LaunchSiteRegistry {
    sites: Vec<LaunchSite>,
}

impl LaunchSiteRegistry {
    pub fn new(sites: Vec<LaunchSite>) -> Result<Self, DispatchError> {
        if sites.is_empty() {
            return Err(DispatchError::RegistryEmpty);
        }

        let mut seen = HashSet::new();
        for site in &sites {
            if !seen.insert(site.identifier.as_str()) {
                return Err(DispatchError::DuplicateSite(site.identifier.clone()));
            }
        }

        Ok(Self { sites })
    }

    /// Registry holding the reference deployment's three sites
    pub fn reference() -> Self {
        Self {
            sites: reference_sites(),
        }
    }

    /// Closest site to `target` and its distance in kilometres.
    /// Ties go to the site registered first.
    pub fn nearest(&self, target: &Coordinate) -> (&LaunchSite, f64) {
        let first = &self.sites[0];
        let mut best = (first, distance_km(&first.location, target));

        for site in &self.sites[1..] {
            let distance = distance_km(&site.location, target);
            if distance < best.1 {
                best = (site, distance);
            }
        }

        tracing::debug!(
            site = %best.0.identifier,
            distance_km = best.1,
            "Nearest launch site resolved"
        );
        best
    }

    pub fn get(&self, identifier: &str) -> Option<&LaunchSite> {
        self.sites.iter().find(|site| site.identifier == identifier)
    }

    pub fn sites(&self) -> &[LaunchSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_is_rejected() {
        assert_eq!(
            LaunchSiteRegistry::new(vec![]).unwrap_err(),
            DispatchError::RegistryEmpty
        );
    }

    #[test]
    fn test_duplicate_identifiers_are_rejected() {
        let sites = vec![
            LaunchSite::new("A", "first", Coordinate::new(1.0, 1.0)),
            LaunchSite::new("A", "second", Coordinate::new(2.0, 2.0)),
        ];
        assert_eq!(
            LaunchSiteRegistry::new(sites).unwrap_err(),
            DispatchError::DuplicateSite("A".to_string())
        );
    }

    #[test]
    fn test_nearest_at_site_coordinate_returns_that_site() {
        let registry = LaunchSiteRegistry::reference();
        for site in registry.sites() {
            let (nearest, distance) = registry.nearest(&site.location);
            assert_eq!(nearest.identifier, site.identifier);
            assert!(distance.abs() < 1e-9);
        }
    }

    #[test]
    fn test_nearest_reference_scenario() {
        let registry = LaunchSiteRegistry::reference();
        let (site, distance) = registry.nearest(&Coordinate::new(22.9950, 113.7260));
        assert_eq!(site.identifier, "DH");
        assert!(distance < 0.1, "distance was {}", distance);
    }

    #[test]
    fn test_nearest_picks_closest_of_all_sites() {
        let registry = LaunchSiteRegistry::reference();
        assert_eq!(registry.nearest(&Coordinate::new(22.92, 113.84)).0.identifier, "CT");
        assert_eq!(registry.nearest(&Coordinate::new(23.02, 113.75)).0.identifier, "YF");
    }

    #[test]
    fn test_ties_go_to_first_registered() {
        // Target sits exactly between two sites on the equator
        let registry = LaunchSiteRegistry::new(vec![
            LaunchSite::new("WEST", "west", Coordinate::new(0.0, 9.0)),
            LaunchSite::new("EAST", "east", Coordinate::new(0.0, 11.0)),
        ])
        .unwrap();
        let (site, _) = registry.nearest(&Coordinate::new(0.0, 10.0));
        assert_eq!(site.identifier, "WEST");
    }

    #[test]
    fn test_lookup_by_identifier() {
        let registry = LaunchSiteRegistry::reference();
        assert_eq!(registry.get("CT").map(|s| s.name.as_str()), Some("创投大厦"));
        assert!(registry.get("ZZ").is_none());
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
