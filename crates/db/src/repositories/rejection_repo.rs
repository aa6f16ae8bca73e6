//! Repository for the `match_rejections` table.

use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::matching::MatchRejection;

/// Column list for `match_rejections` queries.
const COLUMNS: &str = "id, rejecter_id, rejected_id, created_at";

/// Provides idempotent writes to the directed rejection set.
pub struct RejectionRepo;

impl RejectionRepo {
    /// Insert-or-ignore a directed rejection.
    ///
    /// Repeating the same (rejecter, rejected) pair collapses onto the
    /// existing row. Returns `true` only when a new row was written.
    pub async fn create(
        pool: &PgPool,
        rejecter_id: DbId,
        rejected_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO match_rejections (rejecter_id, rejected_id) \
             VALUES ($1, $2) \
             ON CONFLICT (rejecter_id, rejected_id) DO NOTHING",
        )
        .bind(rejecter_id)
        .bind(rejected_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All rejections issued by a user, newest first.
    pub async fn list_by_rejecter(
        pool: &PgPool,
        rejecter_id: DbId,
    ) -> Result<Vec<MatchRejection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM match_rejections \
             WHERE rejecter_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MatchRejection>(&query)
            .bind(rejecter_id)
            .fetch_all(pool)
            .await
    }
}
