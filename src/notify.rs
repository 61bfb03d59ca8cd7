//! Notification boundary — the engine decides, an external sink delivers.
//!
//! The engine never talks to a chat platform. It hands fully-formed
//! [`PetEvent`]s to a [`NotificationSink`] supplied by the embedding
//! application. Delivery is strictly best-effort: a failed delivery is
//! logged and swallowed, never retried, and never rolls back the pet
//! mutation that produced the event.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::ActionReceipt;
use crate::mood::Mood;
use crate::types::UserId;

/// Events the engine emits towards users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PetEvent {
    /// A second user accepted the invitation; the pairing now exists.
    PairFormed {
        /// The user who just joined.
        partner: UserId,
    },
    /// The partner performed an action on the shared pet.
    ActionPerformed(ActionReceipt),
    /// The pet's stats dropped below the distress threshold.
    Distress {
        /// Stat average after the decay sweep.
        average: u8,
        /// Mood tier after the decay sweep.
        mood: Mood,
    },
    /// The pairing was dissolved.
    Dissolved {
        /// The user who left.
        by: UserId,
    },
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The sink accepted the event.
    Delivered,
    /// The sink could not deliver; the engine will not retry.
    Failed,
}

/// Where pet events go.
///
/// Implementations wrap whatever transport the application uses. They must
/// not block for long — the engine calls this inline from request handling
/// and from the decay sweep.
pub trait NotificationSink: Send + Sync {
    /// Deliver `event` to `user`. Best effort.
    fn deliver(&self, user: UserId, event: &PetEvent) -> DeliveryStatus;
}

/// A sink that drops every event. Useful for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _user: UserId, _event: &PetEvent) -> DeliveryStatus {
        DeliveryStatus::Delivered
    }
}

/// Deliver an event and swallow failure with a warning.
pub(crate) fn deliver_best_effort(sink: &dyn NotificationSink, user: UserId, event: &PetEvent) {
    if sink.deliver(user, event) == DeliveryStatus::Failed {
        warn!(user = %user, ?event, "notification delivery failed, dropping");
    }
}
