//! Weighted music preference rows and read models.

use duet_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// One weighted preference row, from any of the three category tables.
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceRow {
    pub item_id: DbId,
    pub weight: i32,
}

/// A preference joined with its catalog item name, for candidate cards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NamedPreference {
    pub item_id: DbId,
    pub name: String,
    pub weight: i32,
}

/// The highest-weighted preferences per category (at most N each).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopPreferences {
    pub genres: Vec<NamedPreference>,
    pub artists: Vec<NamedPreference>,
    pub songs: Vec<NamedPreference>,
}
