//! Append-only swipe log rows.

use duet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One swipe. Rows are only ever inserted, never mutated.
#[derive(Debug, Clone, FromRow)]
pub struct Swipe {
    pub id: DbId,
    pub swiper_id: DbId,
    pub target_id: DbId,
    pub swipe_type: String,
    pub created_at: Timestamp,
}
