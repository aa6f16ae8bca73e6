//! Handlers for candidate discovery and the match lifecycle.
//!
//! Candidates are recomputed from current state on every request: the
//! exclusion query runs first, then each eligible profile is scored with
//! the CALLER's configured weights and the list is ranked by combined
//! score. Accepting is one-sided: a single accept call creates the match
//! (and its conversation) without waiting for the other user's consent.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use duet_core::error::CoreError;
use duet_core::matching::{
    normalize_pair, EVENT_MATCH_CREATED, SWIPE_DISLIKE, SWIPE_LIKE,
};
use duet_core::scoring::{
    compatibility_percent, score_users, ScoringWeights, SimilarityBreakdown,
};
use duet_core::types::{DbId, Timestamp};
use duet_db::models::matching::{FrozenScores, Match};
use duet_db::models::preference::TopPreferences;
use duet_db::models::user::ProfileSummary;
use duet_db::repositories::{
    MatchRepo, PreferenceRepo, RejectionRepo, SwipeRepo, UserRepo, WeightSettingsRepo,
};
use duet_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Candidate cards show at most this many preferences per category.
const TOP_PREFERENCES_PER_CATEGORY: i64 = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for accept and reject: the target user.
#[derive(Debug, Deserialize)]
pub struct MatchActionRequest {
    pub user_id: DbId,
}

/// One entry in the candidate listing.
#[derive(Debug, Serialize)]
pub struct CandidateEntry {
    pub user: ProfileSummary,
    pub top_preferences: TopPreferences,
    pub scores: SimilarityBreakdown,
    /// Display-scaled score in [0, 100].
    pub compatibility: f64,
}

/// A match from the calling user's perspective.
#[derive(Debug, Serialize)]
pub struct MatchView {
    pub id: DbId,
    pub partner_id: DbId,
    pub genre_score: f64,
    pub artist_score: f64,
    pub song_score: f64,
    pub combined_score: f64,
    pub compatibility: f64,
    pub created_at: Timestamp,
}

impl MatchView {
    fn for_user(m: Match, user_id: DbId) -> Self {
        let partner_id = m.partner_of(user_id);
        Self {
            id: m.id,
            partner_id,
            genre_score: m.genre_score,
            artist_score: m.artist_score,
            song_score: m.song_score,
            combined_score: m.combined_score,
            compatibility: m.compatibility,
            created_at: m.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/matches/candidates
///
/// Eligible candidates for the caller, scored and sorted by combined score
/// descending. Never includes the caller, matched partners, or users the
/// caller has rejected; users who rejected the caller remain visible.
pub async fn candidates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CandidateEntry>>>> {
    let weights = WeightSettingsRepo::get(&state.pool, auth.user_id).await?;
    let own_prefs = PreferenceRepo::category_preferences(&state.pool, auth.user_id).await?;

    let profiles = MatchRepo::candidate_profiles(&state.pool, auth.user_id).await?;

    let mut entries = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let their_prefs = PreferenceRepo::category_preferences(&state.pool, profile.id).await?;
        let scores = score_users(&own_prefs, &their_prefs, &weights);
        let compatibility = compatibility_percent(scores.combined, &weights);
        let top_preferences =
            PreferenceRepo::top_preferences(&state.pool, profile.id, TOP_PREFERENCES_PER_CATEGORY)
                .await?;

        entries.push(CandidateEntry {
            user: profile,
            top_preferences,
            scores,
            compatibility,
        });
    }

    entries.sort_by(|a, b| {
        b.scores
            .combined
            .partial_cmp(&a.scores.combined)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/matches/accept
///
/// Accept a candidate: creates the match with scores frozen at this moment,
/// plus its conversation, in one transaction. Idempotent -- repeating the
/// call (from either side) returns the existing match with 200 instead of
/// 201, and concurrent accepts from both members converge on one row.
pub async fn accept(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MatchActionRequest>,
) -> AppResult<impl IntoResponse> {
    let target_id = input.user_id;
    let (lo, hi) = normalize_pair(auth.user_id, target_id).map_err(AppError::Core)?;
    ensure_user_exists(&state, target_id).await?;

    // Scores are computed with the CALLER's weights; whoever accepts first
    // freezes the pair's stored scores.
    let weights = WeightSettingsRepo::get(&state.pool, auth.user_id).await?;
    let own_prefs = PreferenceRepo::category_preferences(&state.pool, auth.user_id).await?;
    let their_prefs = PreferenceRepo::category_preferences(&state.pool, target_id).await?;
    let breakdown = score_users(&own_prefs, &their_prefs, &weights);

    let scores = FrozenScores {
        genre: breakdown.genre,
        artist: breakdown.artist,
        song: breakdown.song,
        combined: breakdown.combined,
        compatibility: compatibility_percent(breakdown.combined, &weights),
    };

    let (matched, created) = MatchRepo::accept(&state.pool, lo, hi, &scores).await?;

    SwipeRepo::record(&state.pool, auth.user_id, target_id, SWIPE_LIKE).await?;

    if created {
        tracing::info!(
            user_id = auth.user_id,
            target_id,
            match_id = matched.id,
            compatibility = matched.compatibility,
            "Match created"
        );
        state.event_bus.publish(
            DomainEvent::new(EVENT_MATCH_CREATED)
                .with_match(matched.id)
                .with_actor(auth.user_id)
                .with_recipients(vec![matched.user_lo, matched.user_hi])
                .with_payload(json!({
                    "match_id": matched.id,
                    "compatibility": matched.compatibility,
                })),
        );
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: MatchView::for_user(matched, auth.user_id),
        }),
    ))
}

/// POST /api/v1/matches/reject
///
/// Hide a candidate from the caller's pool. Directed: the target still sees
/// the caller. Idempotent -- repeating the call is success, not an error.
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MatchActionRequest>,
) -> AppResult<StatusCode> {
    let target_id = input.user_id;
    if target_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "a user cannot reject themselves".into(),
        )));
    }
    ensure_user_exists(&state, target_id).await?;

    let inserted = RejectionRepo::create(&state.pool, auth.user_id, target_id).await?;
    SwipeRepo::record(&state.pool, auth.user_id, target_id, SWIPE_DISLIKE).await?;

    if inserted {
        tracing::info!(user_id = auth.user_id, target_id, "Candidate rejected");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/matches
///
/// All matches of the caller, newest first.
pub async fn list_matches(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MatchView>>>> {
    let matches = MatchRepo::list_for_user(&state.pool, auth.user_id).await?;
    let views = matches
        .into_iter()
        .map(|m| MatchView::for_user(m, auth.user_id))
        .collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/matches/weights
///
/// The caller's scoring weights (defaults when never configured).
pub async fn get_weights(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ScoringWeights>>> {
    let weights = WeightSettingsRepo::get(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: weights }))
}

/// PUT /api/v1/matches/weights
///
/// Replace the caller's scoring weights. Every component must lie in
/// [0, 5]; out-of-range input is rejected, never clamped.
pub async fn put_weights(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ScoringWeights>,
) -> AppResult<Json<DataResponse<ScoringWeights>>> {
    input.validate().map_err(AppError::Core)?;

    let saved = WeightSettingsRepo::upsert(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = auth.user_id, "Scoring weights updated");

    Ok(Json(DataResponse {
        data: ScoringWeights::from(saved),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail with `NotFound` unless an active user with this id exists.
async fn ensure_user_exists(state: &AppState, user_id: DbId) -> Result<(), AppError> {
    if UserRepo::exists(&state.pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
    }
}
