//! Repository for the append-only `swipes` table.

use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::swipe::Swipe;

/// Records swipe signals. Rows are never updated or deleted.
pub struct SwipeRepo;

impl SwipeRepo {
    /// Append one swipe to the log.
    pub async fn record(
        pool: &PgPool,
        swiper_id: DbId,
        target_id: DbId,
        swipe_type: &str,
    ) -> Result<Swipe, sqlx::Error> {
        sqlx::query_as::<_, Swipe>(
            "INSERT INTO swipes (swiper_id, target_id, swipe_type) \
             VALUES ($1, $2, $3) \
             RETURNING id, swiper_id, target_id, swipe_type, created_at",
        )
        .bind(swiper_id)
        .bind(target_id)
        .bind(swipe_type)
        .fetch_one(pool)
        .await
    }
}
