//! Match and rejection rows.

use duet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Match row: a normalized unordered pair with scores frozen at acceptance.
///
/// `user_lo < user_hi` always holds; the pair is unique across both
/// orientations. Rows are never updated after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Match {
    pub id: DbId,
    pub user_lo: DbId,
    pub user_hi: DbId,
    pub genre_score: f64,
    pub artist_score: f64,
    pub song_score: f64,
    pub combined_score: f64,
    pub compatibility: f64,
    pub created_at: Timestamp,
}

impl Match {
    /// The other member of the pair, from `user_id`'s perspective.
    pub fn partner_of(&self, user_id: DbId) -> DbId {
        if self.user_lo == user_id {
            self.user_hi
        } else {
            self.user_lo
        }
    }
}

/// Scores captured at acceptance time, as written to the match row.
#[derive(Debug, Clone, Copy)]
pub struct FrozenScores {
    pub genre: f64,
    pub artist: f64,
    pub song: f64,
    pub combined: f64,
    pub compatibility: f64,
}

/// Directed rejection row. A rejecting B does not hide A from B.
#[derive(Debug, Clone, FromRow)]
pub struct MatchRejection {
    pub id: DbId,
    pub rejecter_id: DbId,
    pub rejected_id: DbId,
    pub created_at: Timestamp,
}
