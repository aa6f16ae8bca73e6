//! Durable domain event rows.

use duet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One persisted domain event from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: DbId,
    pub event_type: String,
    pub match_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
