use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::adapters::outbound::messaging::{EventBroadcaster, EventQueue};
use crate::application::DispatchService;
use crate::config::Config;
use crate::domain::services::{
    AllowAll, CoordinateResolver, DispatchPlanner, LaunchSiteRegistry, NoFlyZones, PolicyChain,
    RegionFence,
};
use crate::ports::AdmissionPolicy;

pub struct ServiceRegistry {
    pub service: Arc<DispatchService>,
    pub broadcaster: EventBroadcaster,
    pub fanout_handle: JoinHandle<()>,
}

/// Wire the dispatch core. Must run inside the tokio runtime.
pub fn setup(config: &Config) -> Result<ServiceRegistry> {
    let registry = Arc::new(
        LaunchSiteRegistry::new(config.launch_sites.clone())
            .context("Failed to build launch site registry")?,
    );
    for site in registry.sites() {
        tracing::info!(
            "Launch site registered: {} ({}) at {}",
            site.identifier,
            site.name,
            site.location
        );
    }

    let admission = build_admission(config);

    let planner = DispatchPlanner::new(registry, admission, config.planner_settings())
        .context("Invalid dispatch settings")?;

    let broadcaster = EventBroadcaster::new(
        config.broadcast.max_observers,
        config.broadcast.send_timeout(),
    );
    let (queue, fanout_handle) =
        EventQueue::spawn(broadcaster.clone(), config.broadcast.event_queue_capacity);
    tracing::info!(
        "Event fan-out started: queue_capacity={}, max_observers={}, send_timeout={}ms",
        config.broadcast.event_queue_capacity,
        config.broadcast.max_observers,
        config.broadcast.observer_send_timeout_ms
    );

    let service = DispatchService::new(
        CoordinateResolver::new(config.dispatch.default_task_type.clone()),
        planner,
        Arc::new(queue),
    );

    Ok(ServiceRegistry {
        service: Arc::new(service),
        broadcaster,
        fanout_handle,
    })
}

/// Compose the admission policies enabled by `[admission]`
pub fn build_admission(config: &Config) -> Arc<dyn AdmissionPolicy> {
    let mut chain = PolicyChain::new();

    if config.admission.enforce_region {
        tracing::info!("Admission: region fence {:?}", config.region);
        chain = chain.with(Arc::new(RegionFence::new(config.region.clone())));
    }
    if !config.admission.no_fly_zones.is_empty() {
        tracing::info!(
            "Admission: {} no-fly zone(s)",
            config.admission.no_fly_zones.len()
        );
        chain = chain.with(Arc::new(NoFlyZones::new(
            config.admission.no_fly_zones.clone(),
        )));
    }

    if chain.is_empty() {
        tracing::info!("Admission: all missions admitted");
        Arc::new(AllowAll)
    } else {
        Arc::new(chain)
    }
}
