//! Repository for the `conversations` table.

use duet_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::conversation::Conversation;

/// Creates and resolves the 1:1 conversation attached to a match.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert the conversation row for a match, on the caller's transaction
    /// so match and conversation commit (or roll back) together.
    ///
    /// A second insert for the same match violates the primary key and
    /// surfaces as a conflict.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        match_id: DbId,
    ) -> Result<Conversation, sqlx::Error> {
        sqlx::query_as::<_, Conversation>(
            "INSERT INTO conversations (match_id) VALUES ($1) RETURNING match_id, created_at",
        )
        .bind(match_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Find the conversation for a match, if any.
    pub async fn find_by_match(
        pool: &PgPool,
        match_id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        sqlx::query_as::<_, Conversation>(
            "SELECT match_id, created_at FROM conversations WHERE match_id = $1",
        )
        .bind(match_id)
        .fetch_optional(pool)
        .await
    }
}
