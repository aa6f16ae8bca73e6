//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`DomainEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use duet_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// A matchmaking domain event.
///
/// Constructed via [`DomainEvent::new`] and enriched with the builder
/// methods [`with_match`](DomainEvent::with_match),
/// [`with_actor`](DomainEvent::with_actor),
/// [`with_recipients`](DomainEvent::with_recipients), and
/// [`with_payload`](DomainEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"match.created"`.
    pub event_type: String,

    /// The match this event concerns, when there is one.
    pub match_id: Option<DbId>,

    /// Id of the user whose action produced the event.
    pub actor_user_id: Option<DbId>,

    /// Users whose live connections should receive this event. Delivery is
    /// point-to-point (the members of a match), not broadcast.
    pub recipients: Vec<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            match_id: None,
            actor_user_id: None,
            recipients: Vec::new(),
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the match this event concerns.
    pub fn with_match(mut self, match_id: DbId) -> Self {
        self.match_id = Some(match_id);
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the users whose sockets should receive this event.
    pub fn with_recipients(mut self, recipients: Vec<DbId>) -> Self {
        self.recipients = recipients;
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DomainEvent`].
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; the persistence
    /// task (when running) guarantees database capture.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.sender.send(event);
    }

    /// Open an independent subscription to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            DomainEvent::new("match.created")
                .with_match(7)
                .with_actor(1)
                .with_recipients(vec![1, 2])
                .with_payload(json!({ "compatibility": 54.5 })),
        );

        let event = rx.recv().await.expect("event should arrive");
        assert_eq!(event.event_type, "match.created");
        assert_eq!(event.match_id, Some(7));
        assert_eq!(event.actor_user_id, Some(1));
        assert_eq!(event.recipients, vec![1, 2]);
        assert_eq!(event.payload["compatibility"], 54.5);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        // Must not panic or error.
        bus.publish(DomainEvent::new("message.sent"));
    }

    #[tokio::test]
    async fn each_subscriber_sees_every_event() {
        let bus = EventBus::default();
        let mut rx_a = bus.subscribe();
        let mut rx_b = bus.subscribe();

        bus.publish(DomainEvent::new("match.created"));

        assert_eq!(rx_a.recv().await.unwrap().event_type, "match.created");
        assert_eq!(rx_b.recv().await.unwrap().event_type, "match.created");
    }
}
