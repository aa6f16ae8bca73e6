//! Match-pair normalization and lifecycle constants.
//!
//! A match joins an UNORDERED pair of users: (a, b) and (b, a) address the
//! same row. The ledger stores every pair normalized as (lo, hi) with
//! lo < hi, which gives uniqueness and exclusion checks a single canonical
//! orientation to work with.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Swipe type constants
// ---------------------------------------------------------------------------

/// Positive swipe, recorded when a user accepts a candidate.
pub const SWIPE_LIKE: &str = "LIKE";
/// Negative swipe, recorded when a user rejects a candidate.
pub const SWIPE_DISLIKE: &str = "DISLIKE";

// ---------------------------------------------------------------------------
// Event type constants
// ---------------------------------------------------------------------------

/// A new match (and its conversation) was created.
pub const EVENT_MATCH_CREATED: &str = "match.created";
/// A chat message was posted to a conversation.
pub const EVENT_MESSAGE_SENT: &str = "message.sent";

// ---------------------------------------------------------------------------
// Pair normalization
// ---------------------------------------------------------------------------

/// Normalize an unordered user pair to `(lo, hi)` with `lo < hi`.
///
/// A user cannot pair with themselves; that is a validation error, not a
/// lookup failure.
pub fn normalize_pair(a: DbId, b: DbId) -> Result<(DbId, DbId), CoreError> {
    if a == b {
        return Err(CoreError::Validation(
            "a user cannot match with themselves".into(),
        ));
    }
    Ok(if a < b { (a, b) } else { (b, a) })
}

/// Derive the PostgreSQL advisory-lock key for a normalized pair.
///
/// Concurrent accepts for the same pair must contend on the same key, so the
/// key is a pure function of (lo, hi). Folding two 64-bit ids into one key
/// can collide across distinct pairs; a collision only costs extra
/// serialization, never correctness, and is unreachable while ids fit in
/// 32 bits.
pub fn pair_lock_key(lo: DbId, hi: DbId) -> i64 {
    lo.wrapping_shl(32) ^ hi
}
