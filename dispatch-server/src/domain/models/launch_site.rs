use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A fixed, pre-registered location missions depart from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSite {
    #[serde(rename = "id")]
    pub identifier: String,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl LaunchSite {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            location,
        }
    }
}

/// The three virtual airports of the Dongguan reference deployment
pub fn reference_sites() -> Vec<LaunchSite> {
    vec![
        LaunchSite::new("DH", "顶好大厦", Coordinate::new(22.9944, 113.7258)),
        LaunchSite::new("CT", "创投大厦", Coordinate::new(22.9242, 113.8401)),
        LaunchSite::new("YF", "怡丰昌盛", Coordinate::new(23.0180, 113.7500)),
    ]
}
