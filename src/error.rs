//! Error types for the pawbond engine.
//!
//! Every variant except the storage/serialization ones is a recoverable,
//! user-facing condition: the caller translates it into a message for the
//! acting user. Nothing here is fatal to the process.

use thiserror::Error;

use crate::types::UserId;

/// Top-level error type for all pawbond operations.
#[derive(Error, Debug)]
pub enum PawbondError {
    /// A user tried to pair with themselves.
    #[error("cannot pair a user with themselves")]
    SelfPairing,

    /// A user is already in an active pairing with someone else.
    #[error("user {user} is already paired")]
    AlreadyPaired {
        /// The user that is already in a pairing.
        user: UserId,
    },

    /// The acting user has no active pairing.
    #[error("user {user} has no active pairing")]
    NotPaired {
        /// The user that tried to act without a pairing.
        user: UserId,
    },

    /// No pairing or pet record exists for the given key.
    #[error("record not found")]
    NotFound,

    /// The pet was touched too recently; the action was rejected.
    #[error("action on cooldown for another {remaining_ms}ms")]
    Cooldown {
        /// Milliseconds until the cooldown window expires.
        remaining_ms: i64,
    },

    /// Unrecognized action tag.
    #[error("invalid action: {0:?}")]
    InvalidAction(String),

    /// Pet name outside the allowed length bounds.
    #[error("invalid pet name: {len} chars (allowed {min}-{max})")]
    InvalidName {
        /// Length of the rejected name in characters.
        len: usize,
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// The storage backend failed. The triggering operation aborted with no
    /// partial mutation persisted.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PawbondError>;
