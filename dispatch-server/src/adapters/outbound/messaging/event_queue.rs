//! Bounded queue between command handling and observer fan-out
//!
//! `publish` never waits on delivery: events are handed to a background task
//! that drives the `EventBroadcaster`. When the queue is full the event is
//! dropped with a warning.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::event_broadcaster::EventBroadcaster;
use crate::domain::models::DispatchEvent;
use crate::ports::EventPublisher;

pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<DispatchEvent>,
}

impl EventQueue {
    /// Start the fan-out task. It ends once every `EventQueue` clone is dropped.
    pub fn spawn(broadcaster: EventBroadcaster, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<DispatchEvent>(capacity.max(1));

        let handle = tokio::spawn(async move {
            tracing::info!("Event fan-out task started");
            while let Some(event) = rx.recv().await {
                broadcaster.broadcast(&event).await;
            }
            tracing::info!("Event fan-out task stopped");
        });

        (Self { tx }, handle)
    }
}

#[async_trait]
impl EventPublisher for EventQueue {
    async fn publish(&self, event: DispatchEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    mission_id = %event.mission_id(),
                    "Event queue full, dropping dispatch event"
                );
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::warn!(
                    mission_id = %event.mission_id(),
                    "Event queue closed, dropping dispatch event"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::outbound::messaging::ObserverConnection;
    use crate::domain::models::{Coordinate, DispatchResult, Eta, LaunchSite, MissionCommand};

    fn create_test_event(mission_id: &str) -> DispatchEvent {
        let command = MissionCommand {
            mission_id: mission_id.to_string(),
            task_type: "patrol".to_string(),
            target: Coordinate::new(22.93, 113.84),
        };
        let result = DispatchResult::success(
            LaunchSite::new("CT", "创投大厦", Coordinate::new(22.9242, 113.8401)),
            0.65,
            Eta::new(Duration::from_secs(54)),
        );
        DispatchEvent::flight_start(&command, &result).unwrap()
    }

    #[tokio::test]
    async fn test_queued_events_reach_observers_in_order() {
        let broadcaster = EventBroadcaster::default();
        let (conn, mut rx) = ObserverConnection::new(8);
        broadcaster.register(conn).await.unwrap();

        let (queue, _handle) = EventQueue::spawn(broadcaster, 8);
        queue.publish(create_test_event("Q1")).await;
        queue.publish(create_test_event("Q2")).await;

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(first.contains("Q1"));
        assert!(second.contains("Q2"));
    }

    #[tokio::test]
    async fn test_full_queue_drops_event_without_blocking() {
        let broadcaster = EventBroadcaster::default();
        let (conn, mut rx) = ObserverConnection::new(8);
        broadcaster.register(conn).await.unwrap();

        // current-thread runtime: the fan-out task cannot drain until we yield
        let (queue, _handle) = EventQueue::spawn(broadcaster, 1);
        tokio::time::timeout(Duration::from_millis(100), async {
            queue.publish(create_test_event("Q4")).await;
            queue.publish(create_test_event("Q5")).await;
        })
        .await
        .expect("publish must not wait on a full queue");

        let delivered = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(delivered.contains("Q4"));
        assert!(
            tokio::time::timeout(Duration::from_millis(200), rx.recv())
                .await
                .is_err(),
            "dropped event must not be delivered"
        );
    }

    #[tokio::test]
    async fn test_publish_after_task_stopped_does_not_panic() {
        let (queue, handle) = EventQueue::spawn(EventBroadcaster::default(), 1);
        handle.abort();
        let _ = handle.await;

        queue.publish(create_test_event("Q3")).await;
    }

    #[tokio::test]
    async fn test_task_ends_when_queue_dropped() {
        let (queue, handle) = EventQueue::spawn(EventBroadcaster::default(), 4);
        drop(queue);

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("fan-out task should stop")
            .unwrap();
    }
}
