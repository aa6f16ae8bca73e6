//! Conversation row, 1:1 with a match.

use duet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Conversation row. The match id IS the identity; the row lives and dies
/// with its match.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Conversation {
    pub match_id: DbId,
    pub created_at: Timestamp,
}
