//! Observer WebSocket endpoint
//!
//! Each connection registers with the `EventBroadcaster` and relays the
//! event frames it is handed. Inbound frames are treated as keepalive only.
//! The server pings on a fixed interval. Close, a read error, or a write
//! that fails or exceeds the send timeout ends the session and unregisters
//! the observer.

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use uuid::Uuid;

use super::AppState;
use crate::adapters::outbound::messaging::ObserverConnection;

/// WebSocket upgrade handler
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

async fn handle_websocket(mut socket: WebSocket, state: AppState) {
    let (connection, mut events) = ObserverConnection::new(state.config.broadcast.observer_buffer);
    let observer_id = connection.id();

    if let Err(e) = state.broadcaster.register(connection).await {
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::AGAIN,
                reason: e.to_string().into(),
            })))
            .await;
        return;
    }

    let write_timeout = state.config.broadcast.send_timeout();
    let period = state.config.broadcast.heartbeat_interval();
    let mut heartbeat = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            outbound = events.recv() => match outbound {
                Some(text) => {
                    if !send_frame(&mut socket, Message::Text(text), write_timeout, observer_id).await {
                        break;
                    }
                }
                // Broadcaster dropped this observer
                None => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::debug!(observer_id = %observer_id, "WebSocket read error: {}", e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = heartbeat.tick() => {
                if !send_frame(&mut socket, Message::Ping(Vec::new()), write_timeout, observer_id).await {
                    break;
                }
            }
        }
    }

    state.broadcaster.unregister(observer_id).await;
}

/// Write one frame; false when the write failed or the peer stopped reading
async fn send_frame<S>(sink: &mut S, frame: Message, limit: Duration, observer_id: Uuid) -> bool
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match tokio::time::timeout(limit, sink.send(frame)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::debug!(observer_id = %observer_id, "WebSocket write error: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!(
                observer_id = %observer_id,
                timeout_ms = limit.as_millis() as u64,
                "WebSocket write timed out, closing observer"
            );
            false
        }
    }
}
