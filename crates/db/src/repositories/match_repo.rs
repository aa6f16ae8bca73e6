//! Repository for the `matches` table and the accept state machine.

use duet_core::matching::pair_lock_key;
use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::matching::{FrozenScores, Match};
use crate::models::user::ProfileSummary;
use crate::repositories::ConversationRepo;

/// Column list for `matches` queries.
const COLUMNS: &str = "id, user_lo, user_hi, genre_score, artist_score, song_score, \
    combined_score, compatibility, created_at";

/// True for a PostgreSQL unique-constraint violation (SQLSTATE 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Provides match creation, lookup, and candidate-pool queries.
pub struct MatchRepo;

impl MatchRepo {
    /// Find a match by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Match>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE id = $1");
        sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the match for a normalized pair, if any.
    pub async fn find_by_pair(
        pool: &PgPool,
        lo: DbId,
        hi: DbId,
    ) -> Result<Option<Match>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE user_lo = $1 AND user_hi = $2");
        sqlx::query_as::<_, Match>(&query)
            .bind(lo)
            .bind(hi)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent accept: create the match and its conversation, or return
    /// the existing match untouched.
    ///
    /// The pair must already be normalized (`lo < hi`). Returns the match
    /// plus a flag that is `true` only for the call that actually created
    /// the row.
    ///
    /// Concurrency: the whole sequence runs in one transaction that first
    /// takes a pair-scoped advisory lock, so two users accepting each other
    /// at the same moment serialize -- the second transaction's existence
    /// check sees the first's committed row and returns it. The
    /// `uq_matches_pair` constraint is the backstop for writers that bypass
    /// the lock; a violation is resolved by re-reading the winning row, not
    /// surfaced to the caller. If the conversation insert fails the
    /// transaction rolls back, so a match never exists without its
    /// conversation.
    pub async fn accept(
        pool: &PgPool,
        lo: DbId,
        hi: DbId,
        scores: &FrozenScores,
    ) -> Result<(Match, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(pair_lock_key(lo, hi))
            .execute(&mut *tx)
            .await?;

        let find_query = format!("SELECT {COLUMNS} FROM matches WHERE user_lo = $1 AND user_hi = $2");
        let existing = sqlx::query_as::<_, Match>(&find_query)
            .bind(lo)
            .bind(hi)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(m) = existing {
            tx.commit().await?;
            return Ok((m, false));
        }

        let insert_query = format!(
            "INSERT INTO matches \
                (user_lo, user_hi, genre_score, artist_score, song_score, \
                 combined_score, compatibility) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Match>(&insert_query)
            .bind(lo)
            .bind(hi)
            .bind(scores.genre)
            .bind(scores.artist)
            .bind(scores.song)
            .bind(scores.combined)
            .bind(scores.compatibility)
            .fetch_one(&mut *tx)
            .await;

        let created = match inserted {
            Ok(m) => m,
            Err(e) if is_unique_violation(&e) => {
                // A writer outside the advisory lock committed first; the
                // aborted transaction is discarded and the winner returned.
                tx.rollback().await?;
                let m = Self::find_by_pair(pool, lo, hi)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                return Ok((m, false));
            }
            Err(e) => return Err(e),
        };

        ConversationRepo::create(&mut tx, created.id).await?;
        tx.commit().await?;

        Ok((created, true))
    }

    /// All matches where the user is either side, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Match>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM matches \
             WHERE user_lo = $1 OR user_hi = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Match>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Profile summaries of every user eligible for scoring against
    /// `user_id`.
    ///
    /// Excluded: the user themselves, anyone on either side of one of their
    /// existing matches, and anyone THEY have rejected. A user who rejected
    /// THEM remains eligible -- rejection only hides the target from the
    /// rejecter. Re-computed from current state on every call; nothing is
    /// cached. Result order is an implementation detail; callers rank by
    /// score.
    pub async fn candidate_profiles(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ProfileSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProfileSummary>(
            "SELECT u.id, u.username, u.location, u.age, u.biography \
             FROM users u \
             WHERE u.id <> $1 \
               AND u.is_active \
               AND NOT EXISTS ( \
                   SELECT 1 FROM matches m \
                   WHERE (m.user_lo = $1 AND m.user_hi = u.id) \
                      OR (m.user_lo = u.id AND m.user_hi = $1)) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM match_rejections r \
                   WHERE r.rejecter_id = $1 AND r.rejected_id = u.id) \
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
