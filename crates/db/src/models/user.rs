//! User entity model and DTOs.

use duet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for the owner's view and
/// [`ProfileSummary`] for what other users get to see.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub biography: Option<String>,
    pub interests: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The owner's own account view (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub biography: Option<String>,
    pub interests: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            location: user.location,
            age: user.age,
            biography: user.biography,
            interests: user.interests,
            created_at: user.created_at,
        }
    }
}

/// Public profile fields shown on candidate and match cards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileSummary {
    pub id: DbId,
    pub username: String,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub biography: Option<String>,
}

/// DTO for inserting a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub biography: Option<String>,
    pub interests: Option<String>,
}

/// Profile patch applied by the owning user. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub biography: Option<String>,
    pub interests: Option<String>,
}
