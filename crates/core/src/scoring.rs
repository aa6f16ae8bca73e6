//! Compatibility scoring between two users' music preferences.
//!
//! Each user records weighted preferences (weight 1..=10) along three axes:
//! genre, artist, and song. Per axis the overlap between two users is scored
//! with a weighted overlap coefficient bounded in [0, 1]; the three axis
//! similarities are then combined using the requesting user's configured
//! scoring weights. Scoring never fails: missing data always degrades to a
//! zero similarity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Lowest weight a single preference may carry.
pub const MIN_PREFERENCE_WEIGHT: i32 = 1;
/// Highest weight a single preference may carry.
pub const MAX_PREFERENCE_WEIGHT: i32 = 10;

/// Default multiplier applied to each category when combining similarities.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;
/// Lowest configurable category weight.
pub const MIN_CATEGORY_WEIGHT: f64 = 0.0;
/// Highest configurable category weight.
pub const MAX_CATEGORY_WEIGHT: f64 = 5.0;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A preference axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Genre,
    Artist,
    Song,
}

impl Category {
    /// All categories, in scoring order.
    pub const ALL: [Category; 3] = [Category::Genre, Category::Artist, Category::Song];

    /// Stable lowercase name, used in logs and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Genre => "genre",
            Category::Artist => "artist",
            Category::Song => "song",
        }
    }
}

/// Item id -> preference weight for a single category.
pub type PreferenceMap = HashMap<DbId, i32>;

/// All three per-category preference maps for one user.
#[derive(Debug, Clone, Default)]
pub struct CategoryPreferences {
    pub genre: PreferenceMap,
    pub artist: PreferenceMap,
    pub song: PreferenceMap,
}

impl CategoryPreferences {
    /// The preference map for one category.
    pub fn get(&self, category: Category) -> &PreferenceMap {
        match category {
            Category::Genre => &self.genre,
            Category::Artist => &self.artist,
            Category::Song => &self.song,
        }
    }

    /// True when the user has no preferences recorded in any category.
    pub fn is_empty(&self) -> bool {
        self.genre.is_empty() && self.artist.is_empty() && self.song.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scoring weights
// ---------------------------------------------------------------------------

/// Per-category multipliers applied when combining axis similarities.
///
/// Defaults are an explicit value passed into the scorer, never a process
/// global, so tests can inject arbitrary configurations. When the two sides
/// of a pair configure different weights, the REQUESTING user's weights win;
/// see [`score_users`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub genre: f64,
    pub artist: f64,
    pub song: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            genre: DEFAULT_CATEGORY_WEIGHT,
            artist: DEFAULT_CATEGORY_WEIGHT,
            song: DEFAULT_CATEGORY_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Validate every component against [0, 5].
    ///
    /// Out-of-range input is an error, never silently clamped.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_category_weight(self.genre, "genre_weight")?;
        validate_category_weight(self.artist, "artist_weight")?;
        validate_category_weight(self.song, "song_weight")?;
        Ok(())
    }

    /// Sum of the three components.
    pub fn total(&self) -> f64 {
        self.genre + self.artist + self.song
    }
}

/// Validate that a configured category weight falls within [0, 5].
///
/// Returns a `CoreError::Validation` naming the field if out of range or
/// not a finite number.
pub fn validate_category_weight(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || !(MIN_CATEGORY_WEIGHT..=MAX_CATEGORY_WEIGHT).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between {MIN_CATEGORY_WEIGHT} and {MAX_CATEGORY_WEIGHT}, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

/// Per-category similarities plus the weighted combination for one pair.
///
/// `combined` is the raw weighted sum and is NOT bounded to [0, 100]; use
/// [`compatibility_percent`] when a display-scaled value is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub genre: f64,
    pub artist: f64,
    pub song: f64,
    pub combined: f64,
}

/// Round to 3 decimal places, matching the stored precision of scores.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Weighted overlap coefficient between two preference maps.
///
/// With `shared` the set of items both users rated:
///
/// ```text
/// similarity = 2 * sum(min(a[i], b[i]) for i in shared)
///              ---------------------------------------
///              sum(a.values()) + sum(b.values())
/// ```
///
/// rounded to 3 decimals. The empty-shared-set short circuit makes a zero
/// denominator unreachable: a non-empty intersection implies both maps are
/// non-empty, and every stored weight is at least 1. The result is symmetric
/// in its arguments, bounded in [0, 1], and invariant to how many
/// preferences either user has recorded overall, because both totals are
/// normalized into the denominator.
pub fn category_similarity(a: &PreferenceMap, b: &PreferenceMap) -> f64 {
    let mut numerator: i64 = 0;
    let mut any_shared = false;
    for (item, &wa) in a {
        if let Some(&wb) = b.get(item) {
            any_shared = true;
            numerator += i64::from(wa.min(wb));
        }
    }
    if !any_shared {
        return 0.0;
    }

    let total_a: i64 = a.values().copied().map(i64::from).sum();
    let total_b: i64 = b.values().copied().map(i64::from).sum();

    round3(2.0 * numerator as f64 / (total_a + total_b) as f64)
}

/// Score two users' preferences, combining per-category similarities with
/// the requesting user's configured weights.
///
/// `a` is the requesting user; when the two sides have different weight
/// configurations, `weights` must be the requester's. A user with zero
/// preferences in every category yields `combined = 0.0`, never an error.
pub fn score_users(
    a: &CategoryPreferences,
    b: &CategoryPreferences,
    weights: &ScoringWeights,
) -> SimilarityBreakdown {
    let genre = category_similarity(&a.genre, &b.genre);
    let artist = category_similarity(&a.artist, &b.artist);
    let song = category_similarity(&a.song, &b.song);

    let combined = round3(genre * weights.genre + artist * weights.artist + song * weights.song);

    SimilarityBreakdown {
        genre,
        artist,
        song,
        combined,
    }
}

/// Display scaling policy: map a raw combined score onto [0, 100].
///
/// Normalizes against the weight total, so with default weights this is the
/// familiar x100/3 scaling. A zero weight total yields 0.0. This is a
/// caller-side policy -- the engine always stores and returns the raw
/// combined value alongside it.
pub fn compatibility_percent(combined: f64, weights: &ScoringWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    let percent = (combined / total) * 100.0;
    (percent * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
