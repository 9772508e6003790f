//! Observer registry and dispatch event fan-out
//!
//! Each live observer (a WebSocket connection) owns the receiving half of a
//! bounded mpsc channel. Broadcasting serializes the event once, snapshots the
//! membership under a read lock and then writes to every observer
//! concurrently, each write bounded by the send timeout. A stalled connection
//! never holds the lock and delays a pass by at most one timeout. Observers that fail a write are removed
//! after the pass.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::models::DispatchEvent;
use crate::ports::EventPublisher;

/// Default maximum number of concurrently registered observers
pub const DEFAULT_MAX_OBSERVERS: usize = 100;

/// Default per-observer write timeout
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("observer capacity reached ({0} connections)")]
    CapacityReached(usize),
}

/// Sending half of an observer connection, held by the broadcaster
#[derive(Debug, Clone)]
pub struct ObserverConnection {
    id: Uuid,
    tx: mpsc::Sender<String>,
}

impl ObserverConnection {
    /// Create a connection with a fresh id and the receiver the socket task drains
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Outcome of a single broadcast pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub dropped: usize,
}

#[derive(Clone)]
pub struct EventBroadcaster {
    observers: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
    max_observers: usize,
    send_timeout: Duration,
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OBSERVERS, DEFAULT_SEND_TIMEOUT)
    }
}

impl EventBroadcaster {
    /// `max_observers` of 0 means unlimited
    pub fn new(max_observers: usize, send_timeout: Duration) -> Self {
        Self {
            observers: Arc::new(RwLock::new(HashMap::new())),
            max_observers,
            send_timeout,
        }
    }

    /// Add an observer. Registering the same id twice is a no-op.
    pub async fn register(&self, connection: ObserverConnection) -> Result<(), RegistrationError> {
        let mut observers = self.observers.write().await;

        if observers.contains_key(&connection.id) {
            return Ok(());
        }
        if self.max_observers > 0 && observers.len() >= self.max_observers {
            tracing::warn!(
                observer_id = %connection.id,
                max_observers = self.max_observers,
                "Observer refused: capacity reached"
            );
            return Err(RegistrationError::CapacityReached(self.max_observers));
        }

        observers.insert(connection.id, connection.tx);
        tracing::info!(
            observer_id = %connection.id,
            total = observers.len(),
            "Observer registered"
        );
        Ok(())
    }

    /// Remove an observer; returns whether it was registered
    pub async fn unregister(&self, id: Uuid) -> bool {
        let mut observers = self.observers.write().await;
        let removed = observers.remove(&id).is_some();
        if removed {
            tracing::info!(
                observer_id = %id,
                remaining = observers.len(),
                "Observer unregistered"
            );
        }
        removed
    }

    pub async fn observer_count(&self) -> usize {
        self.observers.read().await.len()
    }

    pub async fn broadcast(&self, event: &DispatchEvent) -> BroadcastReport {
        let message = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    mission_id = %event.mission_id(),
                    "Failed to serialize dispatch event: {}",
                    e
                );
                return BroadcastReport::default();
            }
        };

        let snapshot: Vec<(Uuid, mpsc::Sender<String>)> = {
            let observers = self.observers.read().await;
            observers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        if snapshot.is_empty() {
            tracing::debug!(mission_id = %event.mission_id(), "No observers connected");
            return BroadcastReport::default();
        }

        let send_timeout = self.send_timeout;
        let sends = snapshot.into_iter().map(|(id, tx)| {
            let message = message.clone();
            async move { (id, tx.send_timeout(message, send_timeout).await) }
        });

        let mut report = BroadcastReport::default();
        let mut failed = Vec::new();

        for (id, outcome) in join_all(sends).await {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(observer_id = %id, "Dropping observer after failed send: {}", e);
                    failed.push(id);
                }
            }
        }

        if !failed.is_empty() {
            report.dropped = failed.len();
            let mut observers = self.observers.write().await;
            for id in failed {
                observers.remove(&id);
            }
        }

        tracing::debug!(
            mission_id = %event.mission_id(),
            delivered = report.delivered,
            dropped = report.dropped,
            "Dispatch event broadcast"
        );
        report
    }
}

#[async_trait]
impl EventPublisher for EventBroadcaster {
    async fn publish(&self, event: DispatchEvent) {
        self.broadcast(&event).await;
    }
}
