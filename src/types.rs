//! Core identity types for the pawbond engine.
//!
//! A pet is jointly owned by exactly two users. The pair is unordered:
//! whichever of the two users asks about "our pet", they must land on the
//! same record, so the canonical key sorts the two handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Opaque handle for a user.
///
/// The engine never interprets the value; chat platforms typically supply a
/// numeric account ID here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical key for an unordered pair of distinct users.
///
/// Construction sorts the two handles, so `canonical(a, b)` and
/// `canonical(b, a)` produce the same key and either partner resolves to the
/// same pairing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    smaller: UserId,
    larger: UserId,
}

impl PairKey {
    /// Build the canonical key for two users.
    ///
    /// Returns `None` when both handles are the same user — a pair requires
    /// two distinct participants.
    #[must_use]
    pub fn canonical(a: UserId, b: UserId) -> Option<Self> {
        if a == b {
            return None;
        }
        let (smaller, larger) = if a < b { (a, b) } else { (b, a) };
        Some(Self { smaller, larger })
    }

    /// The lexicographically smaller member.
    #[must_use]
    pub fn smaller(&self) -> UserId {
        self.smaller
    }

    /// The lexicographically larger member.
    #[must_use]
    pub fn larger(&self) -> UserId {
        self.larger
    }

    /// Whether `user` is one of the two members.
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.smaller == user || self.larger == user
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.smaller, self.larger)
    }
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

/// The durable relationship between two users that jointly own one pet.
///
/// A user belongs to at most one pairing at a time; the pairing and its pet
/// are created and deleted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Canonical pair key.
    pub key: PairKey,
    /// When the second user accepted the invitation.
    pub created_at: DateTime<Utc>,
}

impl Pairing {
    /// Both members, smaller handle first.
    #[must_use]
    pub fn members(&self) -> [UserId; 2] {
        [self.key.smaller(), self.key.larger()]
    }

    /// The other member of the pairing, or `None` if `user` is not a member.
    #[must_use]
    pub fn partner_of(&self, user: UserId) -> Option<UserId> {
        if user == self.key.smaller() {
            Some(self.key.larger())
        } else if user == self.key.larger() {
            Some(self.key.smaller())
        } else {
            None
        }
    }

    /// Whole days elapsed since the pairing was formed (floor).
    #[must_use]
    pub fn days_together(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.created_at).num_days().max(0)
    }
}
