//! Mood projection — a stateless classification of the pet's stat average.
//!
//! Pure and total over the stat domain: every combination of stats in
//! [0,100]³ maps to exactly one tier. Presentation layers pick emoji, sprites
//! or copy from the tier; the engine only derives the class.

use serde::{Deserialize, Serialize};

use crate::pet::Pet;

/// Qualitative mood tier, ordered from worst to best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Mood {
    /// Average below 30 — the pet urgently needs attention.
    Distressed,
    /// Average below 50.
    Sad,
    /// Average below 70.
    Neutral,
    /// Average below 85.
    Happy,
    /// Average 85 or above.
    Elated,
}

impl Mood {
    /// Stable lowercase label for the tier.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Distressed => "distressed",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Elated => "elated",
        }
    }
}

/// Classify a pet's mood from its stat average.
#[must_use]
pub fn classify(pet: &Pet) -> Mood {
    from_average(pet.stat_average())
}

/// Classify a mood directly from a stat average in [0,100].
#[must_use]
pub fn from_average(average: u8) -> Mood {
    match average {
        0..=29 => Mood::Distressed,
        30..=49 => Mood::Sad,
        50..=69 => Mood::Neutral,
        70..=84 => Mood::Happy,
        _ => Mood::Elated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn breakpoints() {
        assert_eq!(from_average(0), Mood::Distressed);
        assert_eq!(from_average(29), Mood::Distressed);
        assert_eq!(from_average(30), Mood::Sad);
        assert_eq!(from_average(49), Mood::Sad);
        assert_eq!(from_average(50), Mood::Neutral);
        assert_eq!(from_average(69), Mood::Neutral);
        assert_eq!(from_average(70), Mood::Happy);
        assert_eq!(from_average(84), Mood::Happy);
        assert_eq!(from_average(85), Mood::Elated);
        assert_eq!(from_average(100), Mood::Elated);
    }

    #[test]
    fn classify_uses_stat_average() {
        let mut pet = Pet::new(Utc::now());
        pet.satiety = 100;
        pet.affection = 100;
        pet.hygiene = 100;
        assert_eq!(classify(&pet), Mood::Elated);

        pet.satiety = 0;
        pet.affection = 0;
        pet.hygiene = 0;
        assert_eq!(classify(&pet), Mood::Distressed);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Mood::Distressed < Mood::Sad);
        assert!(Mood::Happy < Mood::Elated);
    }
}
