//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `duet_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod matches;
pub mod messages;
pub mod users;
