//! Route definitions for the `/matches` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{matches, messages};
use crate::state::AppState;

/// Routes mounted at `/matches`.
///
/// ```text
/// GET  /                        -> accepted matches
/// GET  /candidates              -> scored candidate pool
/// POST /accept                  -> accept a candidate (idempotent)
/// POST /reject                  -> reject a candidate (idempotent)
/// GET  /weights                 -> scoring weights
/// PUT  /weights                 -> replace scoring weights
/// GET  /{match_id}/messages     -> conversation history
/// POST /{match_id}/messages     -> send a message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(matches::list_matches))
        .route("/candidates", get(matches::candidates))
        .route("/accept", post(matches::accept))
        .route("/reject", post(matches::reject))
        .route(
            "/weights",
            get(matches::get_weights).put(matches::put_weights),
        )
        .route(
            "/{match_id}/messages",
            get(messages::list_messages).post(messages::send_message),
        )
}
