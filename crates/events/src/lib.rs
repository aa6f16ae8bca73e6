//! duet event bus and durable event log.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical event envelope carried on the bus.
//! - [`EventPersistence`] -- background service that writes every published
//!   event to the `events` table.
//!
//! The API server publishes `match.created` and `message.sent` events here;
//! the WebSocket relay and the persistence task each hold an independent
//! subscription.

pub mod bus;
pub mod persistence;

pub use bus::{DomainEvent, EventBus};
pub use persistence::EventPersistence;
