//! Event-to-WebSocket relay.
//!
//! [`EventRelay`] subscribes to the event bus and pushes each event to the
//! live sockets of its recipients -- the two members of a match for
//! `match.created`, both members of the conversation for `message.sent`.
//! Users without an open socket simply miss the frame; history is always
//! recoverable over REST.

use std::sync::Arc;

use axum::extract::ws::Message;
use duet_events::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes domain events to their recipients' WebSocket connections.
pub struct EventRelay {
    ws_manager: Arc<WsManager>,
}

impl EventRelay {
    /// Create a relay delivering through the given connection manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the relay loop.
    ///
    /// Consumes events from `receiver` until the channel closes (i.e. the
    /// [`EventBus`](duet_events::EventBus) is dropped at shutdown).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.deliver(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event relay lagged, frames were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, relay shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and push it to every recipient's connections.
    async fn deliver(&self, event: &DomainEvent) {
        let frame = match serde_json::to_string(&WsFrame::from(event)) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Unserializable event");
                return;
            }
        };

        for &user_id in &event.recipients {
            let delivered = self
                .ws_manager
                .send_to_user(user_id, Message::Text(frame.clone().into()))
                .await;
            tracing::debug!(
                user_id,
                delivered,
                event_type = %event.event_type,
                "Relayed event"
            );
        }
    }
}

/// The JSON frame shape pushed to clients.
#[derive(Debug, serde::Serialize)]
struct WsFrame<'a> {
    /// Event name, e.g. `"message.sent"`.
    r#type: &'a str,
    match_id: Option<duet_core::types::DbId>,
    payload: &'a serde_json::Value,
}

impl<'a> From<&'a DomainEvent> for WsFrame<'a> {
    fn from(event: &'a DomainEvent) -> Self {
        Self {
            r#type: &event.event_type,
            match_id: event.match_id,
            payload: &event.payload,
        }
    }
}
