//! Real-time delivery of domain events to connected clients.

pub mod relay;

pub use relay::EventRelay;
