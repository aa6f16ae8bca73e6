//! Read access to users' weighted music preferences.
//!
//! Preferences are written by catalog ingestion (and test fixtures) and are
//! read-only to the matching engine, which consumes them as plain
//! item -> weight maps so the scorer stays decoupled from persistence.

use duet_core::scoring::{Category, CategoryPreferences, PreferenceMap};
use duet_core::types::DbId;
use sqlx::PgPool;

use crate::models::preference::{NamedPreference, PreferenceRow, TopPreferences};

/// Provides per-category preference reads and the ingestion upsert.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// The item -> weight map for one category.
    pub async fn weights_by_category(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
    ) -> Result<PreferenceMap, sqlx::Error> {
        let query = match category {
            Category::Genre => {
                "SELECT genre_id AS item_id, weight FROM user_genre_preferences WHERE user_id = $1"
            }
            Category::Artist => {
                "SELECT artist_id AS item_id, weight FROM user_artist_preferences WHERE user_id = $1"
            }
            Category::Song => {
                "SELECT song_id AS item_id, weight FROM user_song_preferences WHERE user_id = $1"
            }
        };
        let rows: Vec<PreferenceRow> = sqlx::query_as(query).bind(user_id).fetch_all(pool).await?;
        Ok(rows.into_iter().map(|r| (r.item_id, r.weight)).collect())
    }

    /// All three category maps for one user.
    pub async fn category_preferences(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<CategoryPreferences, sqlx::Error> {
        Ok(CategoryPreferences {
            genre: Self::weights_by_category(pool, user_id, Category::Genre).await?,
            artist: Self::weights_by_category(pool, user_id, Category::Artist).await?,
            song: Self::weights_by_category(pool, user_id, Category::Song).await?,
        })
    }

    /// Upsert one preference weight (the ingestion seam; also used by test
    /// fixtures). The weight range 1..=10 is enforced by the schema.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
        item_id: DbId,
        weight: i32,
    ) -> Result<(), sqlx::Error> {
        let query = match category {
            Category::Genre => {
                "INSERT INTO user_genre_preferences (user_id, genre_id, weight) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (user_id, genre_id) DO UPDATE SET weight = EXCLUDED.weight"
            }
            Category::Artist => {
                "INSERT INTO user_artist_preferences (user_id, artist_id, weight) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (user_id, artist_id) DO UPDATE SET weight = EXCLUDED.weight"
            }
            Category::Song => {
                "INSERT INTO user_song_preferences (user_id, song_id, weight) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (user_id, song_id) DO UPDATE SET weight = EXCLUDED.weight"
            }
        };
        sqlx::query(query)
            .bind(user_id)
            .bind(item_id)
            .bind(weight)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// The top `limit` highest-weighted named preferences per category,
    /// for candidate and match cards.
    pub async fn top_preferences(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<TopPreferences, sqlx::Error> {
        let genres = sqlx::query_as::<_, NamedPreference>(
            "SELECT p.genre_id AS item_id, g.name, p.weight \
             FROM user_genre_preferences p \
             JOIN genres g ON g.id = p.genre_id \
             WHERE p.user_id = $1 \
             ORDER BY p.weight DESC, g.name ASC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let artists = sqlx::query_as::<_, NamedPreference>(
            "SELECT p.artist_id AS item_id, a.name, p.weight \
             FROM user_artist_preferences p \
             JOIN artists a ON a.id = p.artist_id \
             WHERE p.user_id = $1 \
             ORDER BY p.weight DESC, a.name ASC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let songs = sqlx::query_as::<_, NamedPreference>(
            "SELECT p.song_id AS item_id, s.name, p.weight \
             FROM user_song_preferences p \
             JOIN songs s ON s.id = p.song_id \
             WHERE p.user_id = $1 \
             ORDER BY p.weight DESC, s.name ASC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(TopPreferences {
            genres,
            artists,
            songs,
        })
    }
}
