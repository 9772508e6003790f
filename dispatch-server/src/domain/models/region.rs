use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::domain::geo::distance_km;

/// Axis-aligned latitude/longitude box.
/// Defaults to the Dongguan operating area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self {
            min_lat: 22.5,
            max_lat: 23.5,
            min_lng: 113.5,
            max_lng: 114.5,
        }
    }
}

impl RegionBounds {
    /// Inclusive on all edges
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude)
            && (self.min_lng..=self.max_lng).contains(&coord.longitude)
    }
}

/// Circular area no mission may target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoFlyZone {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
}

impl NoFlyZone {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        distance_km(&self.center(), coord) <= self.radius_km
    }
}
