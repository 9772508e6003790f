//! `POST /drone/command`
//!
//! The body is read as raw bytes and parsed here rather than through the
//! `Json` extractor: every failure, malformed JSON included, must answer with
//! the same `{status, message, eta}` body the agent expects.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;

use super::AppState;
use crate::application::{CommandResponse, OutcomeKind};
use crate::domain::models::DispatchStatus;

pub async fn submit_command(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<CommandResponse>) {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected malformed command body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(CommandResponse {
                    status: DispatchStatus::Error,
                    message: format!("invalid JSON body: {}", e),
                    eta: String::new(),
                }),
            );
        }
    };

    let outcome = state.service.submit(&payload).await;
    (status_code(outcome.kind), Json(outcome.response))
}

fn status_code(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Dispatched => StatusCode::OK,
        OutcomeKind::InvalidCoordinates => StatusCode::BAD_REQUEST,
        OutcomeKind::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        OutcomeKind::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
