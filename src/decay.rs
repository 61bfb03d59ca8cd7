//! Idle stat decay — time-proportional, downward-only.
//!
//! Decay is computed from `now - last_mutated` and the timestamp is rebased
//! afterwards, so each sweep consumes exactly the idle window it measured.
//! Overlapping windows can never be charged twice, and sweeping a fixed idle
//! span at any granularity lands on the same end stats within integer
//! rounding. Decay never raises a stat and never touches XP or level.

use chrono::{DateTime, Utc};

use crate::config::DecayConfig;
use crate::pet::{Pet, StatKind};

/// What a decay pass did to one pet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayOutcome {
    /// Whether the pet was idle long enough for decay to apply.
    pub decayed: bool,
    /// Whether a distress notification should be emitted for this pet.
    pub distress: bool,
}

/// Stat loss for `hours` of idle time at `rate` points per hour, floored.
#[must_use]
pub fn stat_loss(hours: f64, rate: f64) -> i16 {
    // A loss beyond the full stat range clamps anyway; cap before the cast.
    #[allow(clippy::cast_possible_truncation)]
    let loss = (hours * rate).floor().clamp(0.0, 100.0) as i16;
    loss
}

/// Apply one decay pass to a pet.
///
/// No-op while the pet has been idle for less than `min_idle_minutes`.
/// Otherwise subtracts the floored per-stat losses (clamped at 0), rebases
/// `last_mutated` to `now` — which also resets the action cooldown clock,
/// the two share the timestamp field — and evaluates the distress rule:
/// stat average under the threshold emits a distress flag at most once per
/// `distress_cooldown_minutes`.
pub fn apply_decay(pet: &mut Pet, now: DateTime<Utc>, config: &DecayConfig) -> DecayOutcome {
    let idle = now.signed_duration_since(pet.last_mutated);
    if idle.num_minutes() < config.min_idle_minutes {
        return DecayOutcome::default();
    }

    #[allow(clippy::cast_precision_loss)]
    let hours = idle.num_seconds().max(0) as f64 / 3600.0;
    pet.apply_delta(StatKind::Satiety, -stat_loss(hours, config.satiety_per_hour));
    pet.apply_delta(StatKind::Affection, -stat_loss(hours, config.affection_per_hour));
    pet.apply_delta(StatKind::Hygiene, -stat_loss(hours, config.hygiene_per_hour));
    pet.last_mutated = now;

    let distress = pet.stat_average() < config.distress_threshold
        && pet
            .last_distress
            .is_none_or(|at| now.signed_duration_since(at).num_minutes()
                >= config.distress_cooldown_minutes);
    if distress {
        pet.last_distress = Some(now);
    }

    DecayOutcome {
        decayed: true,
        distress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn idle_pet(idle: Duration) -> (Pet, DateTime<Utc>) {
        let now = Utc::now();
        let mut pet = Pet::new(now - idle);
        pet.satiety = 50;
        pet.affection = 50;
        pet.hygiene = 50;
        (pet, now)
    }

    #[test]
    fn three_hours_idle_scenario() {
        let (mut pet, now) = idle_pet(Duration::hours(3));
        let outcome = apply_decay(&mut pet, now, &DecayConfig::default());

        assert!(outcome.decayed);
        assert_eq!(pet.satiety, 32, "50 - floor(3 * 6.0)");
        assert_eq!(pet.affection, 38, "50 - floor(3 * 4.0)");
        assert_eq!(pet.hygiene, 40, "50 - floor(3 * 3.5)");
        assert_eq!(pet.last_mutated, now, "timestamp rebased to sweep time");
    }

    #[test]
    fn below_min_idle_is_a_noop() {
        let (mut pet, now) = idle_pet(Duration::minutes(29));
        let before = pet.clone();
        let outcome = apply_decay(&mut pet, now, &DecayConfig::default());
        assert!(!outcome.decayed);
        assert_eq!(pet, before);
    }

    #[test]
    fn decay_clamps_at_zero() {
        let (mut pet, now) = idle_pet(Duration::hours(200));
        apply_decay(&mut pet, now, &DecayConfig::default());
        assert_eq!(pet.satiety, 0);
        assert_eq!(pet.affection, 0);
        assert_eq!(pet.hygiene, 0);
    }

    #[test]
    fn decay_never_touches_xp_or_level() {
        let (mut pet, now) = idle_pet(Duration::hours(10));
        pet.xp = 42;
        pet.level = 3;
        apply_decay(&mut pet, now, &DecayConfig::default());
        assert_eq!(pet.xp, 42);
        assert_eq!(pet.level, 3);
    }

    #[test]
    fn rebased_window_is_consumed() {
        // Two back-to-back sweeps at the same instant: the second sees zero
        // idle time and must not double-charge.
        let (mut pet, now) = idle_pet(Duration::hours(2));
        apply_decay(&mut pet, now, &DecayConfig::default());
        let after_first = pet.clone();
        let outcome = apply_decay(&mut pet, now, &DecayConfig::default());
        assert!(!outcome.decayed);
        assert_eq!(pet, after_first);
    }

    #[test]
    fn distress_fires_below_threshold_and_rate_limits() {
        let config = DecayConfig::default();
        let (mut pet, now) = idle_pet(Duration::hours(6));
        pet.satiety = 20;
        pet.affection = 20;
        pet.hygiene = 20;

        let first = apply_decay(&mut pet, now, &config);
        assert!(first.distress);
        assert_eq!(pet.last_distress, Some(now));

        // Next sweep an hour later: still miserable, but inside the
        // notification cooldown.
        let later = now + Duration::hours(1);
        let second = apply_decay(&mut pet, later, &config);
        assert!(second.decayed);
        assert!(!second.distress, "rate limited");

        // Past the cooldown the notification may fire again.
        let much_later = now + Duration::minutes(config.distress_cooldown_minutes + 60);
        let third = apply_decay(&mut pet, much_later, &config);
        assert!(third.distress);
    }

    #[test]
    fn healthy_pet_never_flags_distress() {
        let (mut pet, now) = idle_pet(Duration::hours(1));
        pet.satiety = 90;
        pet.affection = 90;
        pet.hygiene = 90;
        let outcome = apply_decay(&mut pet, now, &DecayConfig::default());
        assert!(outcome.decayed);
        assert!(!outcome.distress);
    }
}
