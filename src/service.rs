//! The external interface of the engine.
//!
//! [`PetService`] is what a request-handling collaborator (a chat bot, an
//! HTTP layer, a CLI) talks to: pairing lifecycle, pet queries, actions and
//! mood projection. It owns no state of its own — everything durable lives
//! in the [`PetStore`], everything outbound goes through the
//! [`NotificationSink`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::action::{self, Action, ActionReceipt};
use crate::config::PawbondConfig;
use crate::error::{PawbondError, Result};
use crate::mood::{self, Mood};
use crate::notify::{deliver_best_effort, NotificationSink, PetEvent};
use crate::pet::{self, Pet};
use crate::store::PetStore;
use crate::types::{Pairing, UserId};

/// Facade over the pairing registry, pet store, action engine and mood
/// projector.
pub struct PetService {
    store: Arc<PetStore>,
    config: PawbondConfig,
    sink: Arc<dyn NotificationSink>,
}

impl PetService {
    /// Build a service over an opened store and a notification sink.
    #[must_use]
    pub fn new(
        store: Arc<PetStore>,
        config: PawbondConfig,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            config,
            sink,
        }
    }

    /// The underlying store (shared with the decay scheduler).
    #[must_use]
    pub fn store(&self) -> &Arc<PetStore> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Pairing lifecycle
    // ------------------------------------------------------------------

    /// Pair `inviter` with `acceptor` and create their shared pet.
    ///
    /// Accepting the same invitation twice returns the existing pairing.
    /// On fresh creation the inviter is told their partner joined
    /// (best-effort).
    ///
    /// # Errors
    ///
    /// [`PawbondError::SelfPairing`], [`PawbondError::AlreadyPaired`], or a
    /// storage error.
    pub fn create_pairing(&self, inviter: UserId, acceptor: UserId) -> Result<Pairing> {
        let (pairing, fresh) = self.store.create_pairing(inviter, acceptor, Utc::now())?;
        if fresh {
            deliver_best_effort(
                self.sink.as_ref(),
                inviter,
                &PetEvent::PairFormed { partner: acceptor },
            );
        }
        Ok(pairing)
    }

    /// Find the pairing a user belongs to.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when the user has no active pairing.
    pub fn lookup(&self, user: UserId) -> Result<Pairing> {
        self.store.lookup_pairing(user)
    }

    /// Dissolve a pairing on behalf of `by`, deleting the pet with it.
    ///
    /// The former partner is notified (best-effort). Either user may form a
    /// new pairing immediately afterwards.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when the pairing no longer exists.
    pub fn dissolve(&self, pairing: &Pairing, by: UserId) -> Result<()> {
        self.store.dissolve(pairing)?;
        if let Some(partner) = pairing.partner_of(by) {
            deliver_best_effort(self.sink.as_ref(), partner, &PetEvent::Dissolved { by });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pet queries & mutations
    // ------------------------------------------------------------------

    /// Load the pairing's pet.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when no pet exists for the pairing.
    pub fn pet(&self, pairing: &Pairing) -> Result<Pet> {
        self.store.load_pet(pairing)
    }

    /// Rename the pet. Does not touch `last_mutated`, so a rename neither
    /// resets the decay baseline nor the action cooldown.
    ///
    /// # Errors
    ///
    /// [`PawbondError::InvalidName`] when the name is outside 2–20
    /// characters.
    pub fn rename(&self, pairing: &Pairing, name: &str) -> Result<Pet> {
        if !pet::valid_name(name) {
            return Err(PawbondError::InvalidName {
                len: name.chars().count(),
                min: pet::NAME_MIN,
                max: pet::NAME_MAX,
            });
        }
        let (updated, ()) = self.store.mutate(pairing, |p| {
            p.name = name.to_string();
            Ok(())
        })?;
        Ok(updated)
    }

    /// Apply an action by tag on behalf of `user`.
    ///
    /// Resolves the user's pairing, runs the action engine atomically inside
    /// the store mutation, then relays the receipt to the partner
    /// (best-effort, never affecting the committed result).
    ///
    /// # Errors
    ///
    /// [`PawbondError::InvalidAction`], [`PawbondError::NotPaired`],
    /// [`PawbondError::Cooldown`], or a storage error.
    pub fn apply_tag(&self, user: UserId, tag: &str) -> Result<(Pet, ActionReceipt)> {
        self.apply(user, Action::from_tag(tag)?)
    }

    /// Apply an already-parsed action on behalf of `user`.
    ///
    /// # Errors
    ///
    /// See [`PetService::apply_tag`].
    pub fn apply(&self, user: UserId, action: Action) -> Result<(Pet, ActionReceipt)> {
        let pairing = match self.store.lookup_pairing(user) {
            Ok(pairing) => pairing,
            Err(PawbondError::NotFound) => return Err(PawbondError::NotPaired { user }),
            Err(e) => return Err(e),
        };

        let now = Utc::now();
        let cooldown = Duration::seconds(
            i64::try_from(self.config.action.cooldown_seconds).unwrap_or(i64::MAX),
        );
        let (updated, receipt) = self.store.mutate(&pairing, |p| {
            action::apply_action(p, action, user, now, cooldown, &self.config.leveling)
        })?;

        debug!(
            pair = %pairing.key,
            action = action.as_tag(),
            user = %user,
            level = receipt.new_level,
            "action applied"
        );

        if let Some(partner) = pairing.partner_of(user) {
            deliver_best_effort(
                self.sink.as_ref(),
                partner,
                &PetEvent::ActionPerformed(receipt),
            );
        }
        Ok((updated, receipt))
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    /// Derive the pet's current mood tier.
    #[must_use]
    pub fn mood(&self, pet: &Pet) -> Mood {
        mood::classify(pet)
    }

    /// Whole days the pair has been together.
    #[must_use]
    pub fn days_together(&self, pairing: &Pairing) -> i64 {
        pairing.days_together(Utc::now())
    }
}
