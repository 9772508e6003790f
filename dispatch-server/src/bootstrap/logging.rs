use tracing_appender::non_blocking::WorkerGuard;

use crate::logging;

pub fn setup(config: &crate::config::Config) -> Option<WorkerGuard> {
    let guard = logging::init(&config.logging);

    tracing::info!("Starting Drone Dispatch Server...");
    tracing::info!("Server Version: {}", env!("BUILD_INFO"));

    if config.logging.enabled {
        tracing::info!(
            "File logging enabled: directory={}, prefix={}, rotation={}",
            config.logging.directory,
            config.logging.file_prefix,
            config.logging.rotation
        );
    }

    tracing::info!(
        "Dispatch settings: cruise_speed={} m/s, max_flight_distance={} km, default_task_type={}",
        config.dispatch.cruise_speed_ms,
        config.dispatch.max_flight_distance_km,
        config.dispatch.default_task_type
    );

    guard
}
