//! The action engine — the single place where user actions mutate the pet.
//!
//! Every inbound action flows through [`apply_action`]: cooldown check, stat
//! delta, daily-counter bookkeeping, XP award and level-up resolution happen
//! in one pass over the pet record. Callers run it inside
//! [`PetStore::mutate`](crate::store::PetStore::mutate), which makes the
//! cooldown-check-and-mutate sequence one atomic step — two rapid actions
//! from the two partners cannot both pass the check.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LevelingConfig;
use crate::error::{PawbondError, Result};
use crate::pet::{Pet, StatKind};
use crate::types::UserId;

/// The closed set of user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Feed the pet: satiety +22, 15 XP.
    Feed,
    /// Play with the pet: affection +18, 12 XP.
    Play,
    /// Wash the pet: hygiene +25, 14 XP.
    Clean,
    /// Caress the pet: affection +25, 10 XP.
    Pet,
    /// Tell the partner you miss them: no stat, daily counter +1, 5 XP.
    Miss,
}

impl Action {
    /// Parse an external action tag.
    ///
    /// # Errors
    /// Returns [`PawbondError::InvalidAction`] for unrecognized tags.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "feed" => Ok(Self::Feed),
            "play" => Ok(Self::Play),
            "clean" => Ok(Self::Clean),
            "pet" => Ok(Self::Pet),
            "miss" => Ok(Self::Miss),
            other => Err(PawbondError::InvalidAction(other.to_string())),
        }
    }

    /// Stable lowercase tag for this action.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Clean => "clean",
            Self::Pet => "pet",
            Self::Miss => "miss",
        }
    }

    /// The stat this action raises and by how much, if any.
    #[must_use]
    pub fn stat_delta(self) -> Option<(StatKind, i16)> {
        match self {
            Self::Feed => Some((StatKind::Satiety, 22)),
            Self::Play => Some((StatKind::Affection, 18)),
            Self::Clean => Some((StatKind::Hygiene, 25)),
            Self::Pet => Some((StatKind::Affection, 25)),
            Self::Miss => None,
        }
    }

    /// Experience awarded for this action.
    #[must_use]
    pub fn xp_award(self) -> u32 {
        match self {
            Self::Feed => 15,
            Self::Play => 12,
            Self::Clean => 14,
            Self::Pet => 10,
            Self::Miss => 5,
        }
    }
}

/// What an accepted action did, relayed to the acting user's partner.
///
/// This is a side effect descriptor for the external messaging collaborator,
/// not state held by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    /// The action that was applied.
    pub action: Action,
    /// Who performed it.
    pub acting_user: UserId,
    /// Whether the action crossed at least one level threshold.
    pub leveled_up: bool,
    /// The pet's level after resolution.
    pub new_level: u32,
}

/// Apply a user action to the pet.
///
/// Steps: cooldown check → stat delta (clamped) → daily rollover and counter
/// for [`Action::Miss`] → XP award with the level-up loop → rebase
/// `last_mutated`. A large award can cross several thresholds in one action,
/// hence the loop rather than a single check.
///
/// # Errors
/// Returns [`PawbondError::Cooldown`] when the pet was touched less than
/// `cooldown` ago.
pub fn apply_action(
    pet: &mut Pet,
    action: Action,
    acting_user: UserId,
    now: DateTime<Utc>,
    cooldown: Duration,
    leveling: &LevelingConfig,
) -> Result<ActionReceipt> {
    let elapsed = now.signed_duration_since(pet.last_mutated);
    if elapsed < cooldown {
        return Err(PawbondError::Cooldown {
            remaining_ms: (cooldown - elapsed).num_milliseconds(),
        });
    }

    if let Some((kind, delta)) = action.stat_delta() {
        pet.apply_delta(kind, delta);
    }
    if action == Action::Miss {
        pet.touch_daily(now.date_naive());
        pet.daily_count += 1;
    }

    pet.xp += action.xp_award();
    let old_level = pet.level;
    while pet.xp >= leveling.xp_threshold {
        pet.xp -= leveling.xp_threshold;
        pet.level += 1;
        pet.apply_delta(StatKind::Satiety, leveling.level_bonus);
        pet.apply_delta(StatKind::Affection, leveling.level_bonus);
    }

    pet.last_mutated = now;

    Ok(ActionReceipt {
        action,
        acting_user,
        leveled_up: pet.level > old_level,
        new_level: pet.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Pet, DateTime<Utc>, Duration, LevelingConfig) {
        let now = Utc::now();
        let mut pet = Pet::new(now);
        // Put the last touch safely outside the cooldown window.
        pet.last_mutated = now - Duration::minutes(5);
        (pet, now, Duration::seconds(3), LevelingConfig::default())
    }

    #[test]
    fn unknown_tag_is_invalid() {
        assert!(matches!(
            Action::from_tag("tickle"),
            Err(PawbondError::InvalidAction(_))
        ));
        assert_eq!(Action::from_tag("feed").expect("known"), Action::Feed);
    }

    #[test]
    fn feed_raises_satiety_and_awards_xp() {
        let (mut pet, now, cooldown, leveling) = setup();
        pet.satiety = 80;
        let receipt =
            apply_action(&mut pet, Action::Feed, UserId(1), now, cooldown, &leveling)
                .expect("apply");
        assert_eq!(pet.satiety, 100, "clamped from 102");
        assert_eq!(pet.xp, 15);
        assert!(!receipt.leveled_up);
        assert_eq!(pet.last_mutated, now);
    }

    #[test]
    fn cooldown_rejects_rapid_second_action() {
        let (mut pet, now, cooldown, leveling) = setup();
        apply_action(&mut pet, Action::Feed, UserId(1), now, cooldown, &leveling)
            .expect("first");

        // Partner acts one second later, inside the window.
        let err = apply_action(
            &mut pet,
            Action::Play,
            UserId(2),
            now + Duration::seconds(1),
            cooldown,
            &leveling,
        )
        .unwrap_err();
        match err {
            PawbondError::Cooldown { remaining_ms } => {
                assert!(remaining_ms > 0 && remaining_ms <= 3000);
            }
            other => panic!("expected Cooldown, got {other}"),
        }
        assert_eq!(pet.affection, 50, "rejected action must not mutate");
    }

    #[test]
    fn level_up_grants_bonus_and_keeps_remainder() {
        let (mut pet, now, cooldown, leveling) = setup();
        pet.xp = 95;
        pet.satiety = 50;
        pet.affection = 40;
        let receipt =
            apply_action(&mut pet, Action::Play, UserId(2), now, cooldown, &leveling)
                .expect("apply");
        // 95 + 12 = 107 → level 2, xp 7.
        assert!(receipt.leveled_up);
        assert_eq!(receipt.new_level, 2);
        assert_eq!(pet.level, 2);
        assert_eq!(pet.xp, 7);
        // +18 play delta then +10 level bonus on both stats.
        assert_eq!(pet.affection, 40 + 18 + 10);
        assert_eq!(pet.satiety, 60);
    }

    #[test]
    fn large_award_crosses_multiple_thresholds() {
        let (mut pet, now, cooldown, _) = setup();
        let leveling = LevelingConfig {
            xp_threshold: 10,
            level_bonus: 10,
        };
        pet.xp = 9;
        // 9 + 15 = 24 → two level-ups with remainder 4.
        let receipt =
            apply_action(&mut pet, Action::Feed, UserId(1), now, cooldown, &leveling)
                .expect("apply");
        assert_eq!(receipt.new_level, 3);
        assert_eq!(pet.xp, 4);
    }

    #[test]
    fn miss_increments_daily_counter_only() {
        let (mut pet, now, cooldown, leveling) = setup();
        let before = (pet.satiety, pet.affection, pet.hygiene);
        apply_action(&mut pet, Action::Miss, UserId(1), now, cooldown, &leveling)
            .expect("apply");
        assert_eq!((pet.satiety, pet.affection, pet.hygiene), before);
        assert_eq!(pet.daily_count, 1);
        assert_eq!(pet.xp, 5);
    }

    #[test]
    fn miss_resets_counter_on_a_new_day() {
        let (mut pet, now, cooldown, leveling) = setup();
        pet.daily_count = 7;
        pet.daily_day = (now - Duration::days(1)).date_naive();
        apply_action(&mut pet, Action::Miss, UserId(1), now, cooldown, &leveling)
            .expect("apply");
        assert_eq!(pet.daily_count, 1, "stale day resets before counting");
        assert_eq!(pet.daily_day, now.date_naive());
    }
}
