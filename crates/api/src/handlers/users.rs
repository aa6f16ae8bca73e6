//! Handlers for the authenticated user's own profile.
//!
//! Profile writes are owner-only by construction: the target row is always
//! the authenticated user, never a path parameter.

use axum::extract::State;
use axum::Json;
use duet_core::error::CoreError;
use duet_db::models::user::{UpdateProfile, UserResponse};
use duet_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
///
/// The authenticated user's own account view.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PATCH /api/v1/users/me
///
/// Apply a partial profile update to the authenticated user.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(age) = input.age {
        if !(18..=120).contains(&age) {
            return Err(AppError::Core(CoreError::Validation(
                "age must be between 18 and 120".into(),
            )));
        }
    }
    if let Some(email) = &input.email {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::Core(CoreError::Validation(
                "a valid email address is required".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
