//! Chat message rows.

use duet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Message row joined with the sender's username for display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: DbId,
    pub match_id: DbId,
    pub sender_id: DbId,
    pub sender_username: String,
    pub content: String,
    pub sent_at: Timestamp,
}

/// Request body for posting a message to a conversation.
#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub content: String,
}
