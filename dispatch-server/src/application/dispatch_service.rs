//! Per-command orchestration: resolve, plan, announce, respond

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DispatchError;
use crate::domain::models::{DispatchEvent, DispatchResult, DispatchStatus};
use crate::domain::services::{CoordinateResolver, DispatchPlanner, LaunchSiteRegistry};
use crate::ports::EventPublisher;

/// Body returned to the agent that sent the command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: DispatchStatus,
    pub message: String,
    /// Empty unless the mission was dispatched
    pub eta: String,
}

/// How the command ended, used by adapters to pick a transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Dispatched,
    Rejected,
    InvalidCoordinates,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub kind: OutcomeKind,
    /// Known once the payload resolved
    pub mission_id: Option<String>,
    pub response: CommandResponse,
}

impl CommandOutcome {
    fn from_result(mission_id: String, result: &DispatchResult) -> Self {
        let kind = match result.status {
            DispatchStatus::Success => OutcomeKind::Dispatched,
            DispatchStatus::Rejected => OutcomeKind::Rejected,
            DispatchStatus::Error => OutcomeKind::Failed,
        };
        Self {
            kind,
            mission_id: Some(mission_id),
            response: CommandResponse {
                status: result.status,
                message: result.message.clone(),
                eta: result.eta_text().to_string(),
            },
        }
    }

    fn failure(kind: OutcomeKind, mission_id: Option<String>, message: String) -> Self {
        Self {
            kind,
            mission_id,
            response: CommandResponse {
                status: DispatchStatus::Error,
                message,
                eta: String::new(),
            },
        }
    }
}

/// Single entry point for inbound drone commands
pub struct DispatchService {
    resolver: CoordinateResolver,
    planner: DispatchPlanner,
    publisher: Arc<dyn EventPublisher>,
}

impl DispatchService {
    pub fn new(
        resolver: CoordinateResolver,
        planner: DispatchPlanner,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            resolver,
            planner,
            publisher,
        }
    }

    pub fn registry(&self) -> &LaunchSiteRegistry {
        self.planner.registry()
    }

    pub async fn submit(&self, payload: &Value) -> CommandOutcome {
        let command = match self.resolver.resolve(payload) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "Command payload could not be resolved");
                return CommandOutcome::failure(
                    OutcomeKind::InvalidCoordinates,
                    None,
                    e.to_string(),
                );
            }
        };

        tracing::info!(
            mission_id = %command.mission_id,
            task_type = %command.task_type,
            coordinate = %command.target,
            "Processing drone command"
        );

        let planned = panic::catch_unwind(AssertUnwindSafe(|| self.planner.plan(&command)));
        let result = match planned {
            Ok(result) => result,
            Err(cause) => {
                let message = panic_message(cause.as_ref());
                tracing::error!(
                    mission_id = %command.mission_id,
                    "Dispatch planning failed: {}",
                    message
                );
                DispatchResult::error(DispatchError::Internal(message).to_string())
            }
        };

        if result.is_success() {
            match DispatchEvent::flight_start(&command, &result) {
                Some(event) => self.publisher.publish(event).await,
                None => tracing::error!(
                    mission_id = %command.mission_id,
                    "Successful dispatch produced no flight-start event"
                ),
            }
        }

        CommandOutcome::from_result(command.mission_id, &result)
    }
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error during dispatch planning".to_string()
    }
}
