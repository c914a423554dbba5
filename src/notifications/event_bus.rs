//! Broadcast bus for reservation workflow events
//!
//! A tokio broadcast channel. Subscribers either see every event or only the
//! events of one property, so a page hosting several booking forms can route
//! banners to the right one.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use super::events::{EventMessage, WorkflowEvent};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fire and forget. Nobody listening is not an error.
    pub fn publish(&self, event: WorkflowEvent) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let property_id = message.event.property_id().to_string();

        let delivered = self.sender.send(message).unwrap_or(0);
        debug!(event_type, %property_id, delivered, "Workflow event");
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            property_id: None,
        }
    }

    /// Subscribe to the events of a single property.
    pub fn subscribe_property(&self, property_id: impl Into<String>) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            property_id: Some(property_id.into()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    property_id: Option<String>,
}

impl EventSubscriber {
    fn wants(&self, message: &EventMessage) -> bool {
        match &self.property_id {
            Some(id) => message.event.property_id() == id,
            None => true,
        }
    }

    /// Next matching event; `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Event subscriber fell behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant, for draining after a call returns.
    pub fn try_recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Utc;

    use crate::notifications::events::SubmissionFailedEvent;

    fn failed(property_id: &str) -> WorkflowEvent {
        WorkflowEvent::SubmissionFailed(SubmissionFailedEvent {
            property_id: property_id.to_string(),
            message: "Failed to create booking. Please try again.".to_string(),
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        bus.publish(failed("p-1"));

        let msg = tokio::time::timeout(Duration::from_millis(100), sub.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg.event.event_type(), "submission_failed");
        assert_eq!(msg.event.property_id(), "p-1");
    }

    #[tokio::test]
    async fn property_subscriber_skips_other_properties() {
        let bus = EventBus::new();
        let mut only_p2 = bus.subscribe_property("p-2");

        bus.publish(failed("p-1"));
        bus.publish(failed("p-2"));

        let msg = only_p2.recv().await.unwrap();
        assert_eq!(msg.event.property_id(), "p-2");
        assert!(only_p2.try_recv().is_none());
    }

    #[test]
    fn subscriber_count_follows_drops() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let first = bus.subscribe();
        let _second = bus.subscribe_property("p-1");
        assert_eq!(bus.subscriber_count(), 2);

        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn publishing_to_nobody_is_fine() {
        EventBus::new().publish(failed("p-1"));
    }

    #[tokio::test]
    async fn closed_bus_ends_the_stream() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();
        drop(bus);
        assert!(sub.recv().await.is_none());
    }

    #[test]
    fn message_serializes_with_type_tag() {
        let msg = EventMessage::new(failed("p-1"));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "SubmissionFailed");
        assert_eq!(value["data"]["property_id"], "p-1");
    }
}
