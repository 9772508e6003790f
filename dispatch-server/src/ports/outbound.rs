use crate::domain::models::{Coordinate, DispatchEvent};
use async_trait::async_trait;

/// Policy gate evaluated before a launch site is committed to a mission.
///
/// Real deployments wire weather and airspace checks in here.
#[cfg_attr(test, mockall::automock)]
pub trait AdmissionPolicy: Send + Sync {
    fn is_admissible(&self, target: &Coordinate, task_type: &str) -> bool;
}

/// Hands accepted dispatch events to observers.
///
/// Implementations must not fail the caller: delivery problems are handled
/// (and logged) on the publishing side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DispatchEvent);
}
