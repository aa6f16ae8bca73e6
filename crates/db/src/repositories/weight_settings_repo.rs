//! Repository for the `match_weight_settings` table.

use duet_core::scoring::ScoringWeights;
use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::weights::WeightSettings;

/// Column list for `match_weight_settings` queries.
const COLUMNS: &str = "user_id, genre_weight, artist_weight, song_weight, updated_at";

/// Provides per-user scoring weight reads and upserts.
pub struct WeightSettingsRepo;

impl WeightSettingsRepo {
    /// The user's configured scoring weights, falling back to the defaults
    /// (1.0 per category) when they have never saved any.
    pub async fn get(pool: &PgPool, user_id: DbId) -> Result<ScoringWeights, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM match_weight_settings WHERE user_id = $1");
        let row: Option<WeightSettings> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ScoringWeights::from).unwrap_or_default())
    }

    /// Insert or replace the user's scoring weights.
    ///
    /// Range validation happens in the domain layer before this is called;
    /// the schema CHECK is the backstop.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        weights: &ScoringWeights,
    ) -> Result<WeightSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO match_weight_settings \
                (user_id, genre_weight, artist_weight, song_weight) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                genre_weight = EXCLUDED.genre_weight, \
                artist_weight = EXCLUDED.artist_weight, \
                song_weight = EXCLUDED.song_weight, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeightSettings>(&query)
            .bind(user_id)
            .bind(weights.genre)
            .bind(weights.artist)
            .bind(weights.song)
            .fetch_one(pool)
            .await
    }
}
