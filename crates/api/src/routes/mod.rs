pub mod auth;
pub mod health;
pub mod matches;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket (authenticated via ?token=)
///
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
///
/// /users/me                        own profile (GET, PATCH)
///
/// /matches                         accepted matches (GET)
/// /matches/candidates              scored candidate pool (GET)
/// /matches/accept                  accept a candidate (POST)
/// /matches/reject                  reject a candidate (POST)
/// /matches/weights                 scoring weights (GET, PUT)
/// /matches/{match_id}/messages     conversation history, send (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes.
        .nest("/auth", auth::router())
        // Own-profile routes.
        .nest("/users", users::router())
        // Matching engine: candidates, accept/reject, weights, chat.
        .nest("/matches", matches::router())
}
