//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the table accepts writes

pub mod conversation;
pub mod event;
pub mod matching;
pub mod message;
pub mod preference;
pub mod session;
pub mod swipe;
pub mod user;
pub mod weights;
