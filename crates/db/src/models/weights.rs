//! Per-user scoring weight configuration rows.

use duet_core::scoring::ScoringWeights;
use duet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from `match_weight_settings`. An absent row means defaults (1.0 per
/// category); see `WeightSettingsRepo::get`.
#[derive(Debug, Clone, FromRow)]
pub struct WeightSettings {
    pub user_id: DbId,
    pub genre_weight: f64,
    pub artist_weight: f64,
    pub song_weight: f64,
    pub updated_at: Timestamp,
}

impl From<WeightSettings> for ScoringWeights {
    fn from(row: WeightSettings) -> Self {
        Self {
            genre: row.genre_weight,
            artist: row.artist_weight,
            song: row.song_weight,
        }
    }
}
