// Library interface for drone-dispatch-server
// Exposes modules for integration testing

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
