//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /me -> own profile
/// PATCH /me -> partial profile update (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::me).patch(users::update_me))
}
