use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::models::{reference_sites, LaunchSite, NoFlyZone, RegionBounds, DEFAULT_TASK_TYPE};
use crate::domain::services::PlannerSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub region: RegionBounds,
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Launch sites missions depart from; the reference airports when omitted
    #[serde(default = "reference_sites")]
    pub launch_sites: Vec<LaunchSite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Disable CORS restrictions (allows all origins)
    #[serde(default)]
    pub disable: bool,
    /// Origins allowed when CORS is enabled
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,
    /// Directory for log files (relative to working directory or absolute path)
    #[serde(default = "default_log_directory")]
    pub directory: String,
    /// Prefix for log file names
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
    /// Rotation strategy: "daily", "hourly", or "never"
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
    /// Maximum number of log files to keep (0 = unlimited)
    #[serde(default = "default_max_files")]
    pub max_files: u32,
    /// Maximum age of log files in days (0 = unlimited)
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_logging_enabled() -> bool {
    true
}
fn default_log_directory() -> String {
    "logs".to_string()
}
fn default_log_file_prefix() -> String {
    "drone-dispatch".to_string()
}
fn default_log_rotation() -> String {
    "daily".to_string()
}
fn default_max_files() -> u32 {
    30
}
fn default_max_age_days() -> u32 {
    90
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            directory: default_log_directory(),
            file_prefix: default_log_file_prefix(),
            rotation: default_log_rotation(),
            max_files: default_max_files(),
            max_age_days: default_max_age_days(),
        }
    }
}

/// Optional HTTPS termination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Path to certificate file (.pem)
    #[serde(default = "default_cert_path")]
    pub cert_path: String,
    /// Path to private key file (.pem)
    #[serde(default = "default_key_path")]
    pub key_path: String,
}

fn default_cert_path() -> String {
    "certs/server.pem".to_string()
}

fn default_key_path() -> String {
    "certs/server-key.pem".to_string()
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_path: default_cert_path(),
            key_path: default_key_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Drone cruise speed in metres per second
    #[serde(default = "default_cruise_speed_ms")]
    pub cruise_speed_ms: f64,
    /// Maximum distance from the selected site (0 = unlimited)
    #[serde(default = "default_max_flight_distance_km")]
    pub max_flight_distance_km: f64,
    /// Task type assumed when a command carries none
    #[serde(default = "default_task_type")]
    pub default_task_type: String,
}

fn default_cruise_speed_ms() -> f64 {
    crate::domain::services::eta::DEFAULT_CRUISE_SPEED_MS
}
fn default_max_flight_distance_km() -> f64 {
    crate::domain::services::dispatch_planner::DEFAULT_MAX_FLIGHT_DISTANCE_KM
}
fn default_task_type() -> String {
    DEFAULT_TASK_TYPE.to_string()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            cruise_speed_ms: default_cruise_speed_ms(),
            max_flight_distance_km: default_max_flight_distance_km(),
            default_task_type: default_task_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Maximum concurrent WebSocket observers (0 = unlimited)
    #[serde(default = "default_max_observers")]
    pub max_observers: usize,
    /// Events buffered between command handling and fan-out
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
    /// Messages buffered per observer before sends start waiting
    #[serde(default = "default_observer_buffer")]
    pub observer_buffer: usize,
    /// How long a single observer write may block
    #[serde(default = "default_observer_send_timeout_ms")]
    pub observer_send_timeout_ms: u64,
    /// Interval between server-initiated WebSocket pings
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
}

fn default_max_observers() -> usize {
    100
}
fn default_event_queue_capacity() -> usize {
    256
}
fn default_observer_buffer() -> usize {
    32
}
fn default_observer_send_timeout_ms() -> u64 {
    2000
}
fn default_heartbeat_interval_secs() -> u64 {
    30
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            max_observers: default_max_observers(),
            event_queue_capacity: default_event_queue_capacity(),
            observer_buffer: default_observer_buffer(),
            observer_send_timeout_ms: default_observer_send_timeout_ms(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
        }
    }
}

impl BroadcastConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.observer_send_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs.max(1))
    }
}

/// Which admission policies gate dispatch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdmissionConfig {
    /// Reject targets outside `[region]`
    #[serde(default)]
    pub enforce_region: bool,
    #[serde(default)]
    pub no_fly_zones: Vec<NoFlyZone>,
}

impl Config {
    /// Load config from layered TOML files
    ///
    /// Loads configuration files in the following order (later files override earlier):
    /// 1. {base_name}.toml (required, e.g., config.toml)
    /// 2. {base_name}.{ENV}.toml (optional, only if CONFIG_ENV is set)
    /// 3. {base_name}.local.toml (optional, for personal overrides, git-ignored)
    ///
    /// # Environment Variables
    /// * `CONFIG_ENV` - If set, loads {base_name}.{CONFIG_ENV}.toml (e.g., config.dev.toml)
    pub fn from_file<P: AsRef<Path>>(base_name: P) -> Result<Self> {
        let base_path = base_name.as_ref();
        let base_str = base_path.to_str().context("Invalid base path")?;

        let mut builder = config::Config::builder()
            // 1. Load base config (required)
            .add_source(config::File::with_name(base_str));

        // 2. Load environment-specific config (optional)
        if let Ok(env) = std::env::var("CONFIG_ENV") {
            let env_config = format!("{}.{}", base_str, env);
            builder = builder.add_source(config::File::with_name(&env_config).required(false));
        }

        // 3. Load local config (optional, for personal overrides)
        let local_config = format!("{}.local", base_str);
        builder = builder.add_source(config::File::with_name(&local_config).required(false));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply deployment overrides from the environment
    ///
    /// * `PORT` - replaces `server.port` when it parses as a port number
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Ignoring invalid PORT value: {:?}", raw),
            }
        }
    }

    /// Reject settings the dispatch core cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.launch_sites.is_empty() {
            bail!("at least one [[launch_sites]] entry is required");
        }
        for site in &self.launch_sites {
            if !site.location.is_within_bounds() || site.location.is_origin() {
                bail!(
                    "launch site {} has invalid coordinates {}",
                    site.identifier,
                    site.location
                );
            }
        }
        if self.region.min_lat > self.region.max_lat || self.region.min_lng > self.region.max_lng {
            bail!("[region] minimum bounds must not exceed maximum bounds");
        }
        for zone in &self.admission.no_fly_zones {
            if !(zone.radius_km.is_finite() && zone.radius_km > 0.0) {
                bail!("no-fly zone {} must have a positive radius_km", zone.name);
            }
        }
        if self.broadcast.observer_send_timeout_ms == 0 {
            bail!("[broadcast] observer_send_timeout_ms must be positive");
        }
        if self.broadcast.heartbeat_interval_secs == 0 {
            bail!("[broadcast] heartbeat_interval_secs must be positive");
        }
        Ok(())
    }

    /// Get server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Origins allowed by the CORS layer when it is enabled
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors.allowed_origins.clone()
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            cruise_speed_ms: self.dispatch.cruise_speed_ms,
            max_flight_distance_km: self.dispatch.max_flight_distance_km,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
            tls: TlsConfig::default(),
            dispatch: DispatchConfig::default(),
            broadcast: BroadcastConfig::default(),
            region: RegionBounds::default(),
            admission: AdmissionConfig::default(),
            launch_sites: reference_sites(),
        }
    }
}
