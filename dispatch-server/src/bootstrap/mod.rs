use anyhow::{Context, Result};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_appender::non_blocking::WorkerGuard;

pub mod logging;
pub mod server;
pub mod services;

pub struct Application {
    pub router: Router,
    /// Present when `[tls] enabled = true`
    pub tls_config: Option<RustlsConfig>,
    pub bind_address: String,
    pub socket_addr: SocketAddr,
    /// Event fan-out task; runs for the lifetime of the server
    pub fanout_handle: JoinHandle<()>,
    pub log_guard: Option<WorkerGuard>,
}

pub async fn setup() -> Result<Application> {
    // 1. Load Configuration
    let config = load_config();

    // 2. Setup Logging
    let log_guard = logging::setup(&config);

    config.validate().context("Invalid configuration")?;

    if config.tls.enabled {
        // Initialize rustls with ring crypto provider; a second install is harmless
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    // 3. Setup Services & Background Tasks
    let service_registry = services::setup(&config)?;

    // 4. Setup Server (API & TLS)
    server::setup(config, service_registry, log_guard).await
}

fn load_config() -> crate::config::Config {
    use crate::config::Config;

    // Determine config directory
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_string_lossy().into_owned()))
            .unwrap_or_else(|| ".".to_string())
    });
    let config_base = format!("{}/config", config_dir);

    eprintln!(
        "Config directory: {}, config base: {}",
        config_dir, config_base
    );

    let mut config = match Config::from_file(&config_base) {
        Ok(cfg) => {
            eprintln!("Configuration loaded successfully from {}", config_base);
            cfg
        }
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}, using defaults", e);
            Config::default()
        }
    };
    config.apply_env_overrides();
    config
}
