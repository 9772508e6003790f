pub mod dispatch_service;

pub use dispatch_service::{CommandOutcome, CommandResponse, DispatchService, OutcomeKind};
