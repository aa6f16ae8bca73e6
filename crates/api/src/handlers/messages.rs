//! Handlers for conversation messages.
//!
//! Every operation first resolves the match and checks the caller is one of
//! its two members; outsiders get 403 regardless of whether the match
//! exists. Created messages are persisted over REST and then fanned out to
//! both members' live sockets via the event bus.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use duet_core::error::CoreError;
use duet_core::matching::EVENT_MESSAGE_SENT;
use duet_core::types::DbId;
use duet_db::models::matching::Match;
use duet_db::models::message::{CreateMessage, Message};
use duet_db::repositories::{MatchRepo, MessageRepo};
use duet_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted message body.
const MAX_MESSAGE_LEN: usize = 4000;

/// GET /api/v1/matches/{match_id}/messages
///
/// The conversation history, oldest first, paginated.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<DbId>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    ensure_member(&state, match_id, auth.user_id).await?;

    let messages =
        MessageRepo::list_for_match(&state.pool, match_id, pagination.limit, pagination.offset)
            .await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/matches/{match_id}/messages
///
/// Persist a message and relay it to both members' live connections.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<DbId>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    let matched = ensure_member(&state, match_id, auth.user_id).await?;

    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message content must not be empty".into(),
        )));
    }
    if content.len() > MAX_MESSAGE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "message content must not exceed {MAX_MESSAGE_LEN} characters"
        ))));
    }

    let message = MessageRepo::create(&state.pool, match_id, auth.user_id, content).await?;

    tracing::info!(
        user_id = auth.user_id,
        match_id,
        message_id = message.id,
        "Message sent"
    );

    // Both members get the frame; the sender's other devices stay in sync.
    let payload = serde_json::to_value(&message).unwrap_or(json!({}));
    state.event_bus.publish(
        DomainEvent::new(EVENT_MESSAGE_SENT)
            .with_match(match_id)
            .with_actor(auth.user_id)
            .with_recipients(vec![matched.user_lo, matched.user_hi])
            .with_payload(payload),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the match and require the caller to be one of its members.
async fn ensure_member(
    state: &AppState,
    match_id: DbId,
    user_id: DbId,
) -> Result<Match, AppError> {
    let matched = MatchRepo::find_by_id(&state.pool, match_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Match",
                id: match_id,
            })
        })?;

    if matched.user_lo != user_id && matched.user_hi != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "User is not part of this match".into(),
        )));
    }

    Ok(matched)
}
