pub mod admission;
pub mod coordinate_resolver;
pub mod dispatch_planner;
pub mod eta;
pub mod site_registry;

#[cfg(test)]
mod tests;

pub use admission::{AllowAll, NoFlyZones, PolicyChain, RegionFence};
pub use coordinate_resolver::{detect_shape, CoordinateResolver, RequestShape};
pub use dispatch_planner::{DispatchPlanner, PlannerSettings};
pub use site_registry::LaunchSiteRegistry;
