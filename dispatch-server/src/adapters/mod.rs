//! Adapters connecting the dispatch core to the outside world
//!
//! - `inbound::http`: axum routes for commands, observers and status
//! - `outbound::messaging`: observer registry and event fan-out

pub mod inbound;
pub mod outbound;
