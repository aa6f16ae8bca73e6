//! Repository for the `messages` table.

use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

/// Default page size for message listings.
const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on a single message page.
const MAX_LIMIT: i64 = 200;

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Provides chat message reads and writes.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message into a conversation, returning it joined with the
    /// sender's username.
    pub async fn create(
        pool: &PgPool,
        match_id: DbId,
        sender_id: DbId,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (match_id, sender_id, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, match_id, sender_id, \
                       (SELECT username FROM users WHERE id = $2) AS sender_username, \
                       content, sent_at",
        )
        .bind(match_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Page through a conversation's messages in send order (oldest first).
    pub async fn list_for_match(
        pool: &PgPool,
        match_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT m.id, m.match_id, m.sender_id, u.username AS sender_username, \
                    m.content, m.sent_at \
             FROM messages m \
             JOIN users u ON u.id = m.sender_id \
             WHERE m.match_id = $1 \
             ORDER BY m.sent_at ASC, m.id ASC \
             LIMIT $2 OFFSET $3",
        )
        .bind(match_id)
        .bind(clamp_limit(limit))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }
}
