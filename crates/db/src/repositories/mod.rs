//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-row invariants (the
//! match + conversation pair) are enforced with explicit transactions
//! inside the repository, never left to callers.

pub mod conversation_repo;
pub mod event_repo;
pub mod match_repo;
pub mod message_repo;
pub mod preference_repo;
pub mod rejection_repo;
pub mod session_repo;
pub mod swipe_repo;
pub mod user_repo;
pub mod weight_settings_repo;

pub use conversation_repo::ConversationRepo;
pub use event_repo::EventRepo;
pub use match_repo::MatchRepo;
pub use message_repo::MessageRepo;
pub use preference_repo::PreferenceRepo;
pub use rejection_repo::RejectionRepo;
pub use session_repo::SessionRepo;
pub use swipe_repo::SwipeRepo;
pub use user_repo::UserRepo;
pub use weight_settings_repo::WeightSettingsRepo;
