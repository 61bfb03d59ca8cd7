//! The shared pet record and its bounded-stat arithmetic.
//!
//! Every stat lives in [0,100] and is mutated exclusively through
//! [`Pet::apply_delta`], which clamps — it never wraps and never leaves the
//! range. Field updates go through the closed [`StatKind`] enum rather than
//! any stringly-typed field name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for every pet stat.
pub const STAT_MAX: u8 = 100;

/// Default display name for a freshly created pet.
pub const DEFAULT_NAME: &str = "Mochi";

/// Minimum pet name length in characters.
pub const NAME_MIN: usize = 2;

/// Maximum pet name length in characters.
pub const NAME_MAX: usize = 20;

/// The closed set of mutable pet stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// How well-fed the pet is.
    Satiety,
    /// How loved the pet feels.
    Affection,
    /// How clean the pet is.
    Hygiene,
}

/// The shared stateful pet, owned by exactly one pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Display name, bounded to [`NAME_MIN`]..=[`NAME_MAX`] characters.
    pub name: String,
    /// Fullness, 0–100.
    pub satiety: u8,
    /// Felt affection, 0–100.
    pub affection: u8,
    /// Cleanliness, 0–100.
    pub hygiene: u8,
    /// Experience points, always in `[0, xp_threshold)` after resolution.
    pub xp: u32,
    /// Level, starts at 1 and only ever increases.
    pub level: u32,
    /// Last time an action or a decay sweep touched this pet.
    ///
    /// Doubles as the decay baseline and the action cooldown anchor, which
    /// means a decay sweep also resets the cooldown clock.
    pub last_mutated: DateTime<Utc>,
    /// Number of `miss` pings sent today.
    pub daily_count: u32,
    /// The calendar day `daily_count` belongs to; rolls over lazily on the
    /// first touch of a new day.
    pub daily_day: NaiveDate,
    /// Last time a distress notification was emitted, for rate limiting.
    pub last_distress: Option<DateTime<Utc>>,
}

impl Pet {
    /// Create a pet with the starting stats (satiety 80, affection 50,
    /// hygiene 70) at level 1.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            satiety: 80,
            affection: 50,
            hygiene: 70,
            xp: 0,
            level: 1,
            last_mutated: now,
            daily_count: 0,
            daily_day: now.date_naive(),
            last_distress: None,
        }
    }

    /// Read a stat by kind.
    #[must_use]
    pub fn stat(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Satiety => self.satiety,
            StatKind::Affection => self.affection,
            StatKind::Hygiene => self.hygiene,
        }
    }

    /// Add `delta` to a stat, clamping the result to [0, [`STAT_MAX`]].
    pub fn apply_delta(&mut self, kind: StatKind, delta: i16) {
        let current = i16::from(self.stat(kind));
        let next = (current + delta).clamp(0, i16::from(STAT_MAX));
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let next = next as u8;
        match kind {
            StatKind::Satiety => self.satiety = next,
            StatKind::Affection => self.affection = next,
            StatKind::Hygiene => self.hygiene = next,
        }
    }

    /// Integer average of the three stats, in [0,100].
    #[must_use]
    pub fn stat_average(&self) -> u8 {
        let sum = u16::from(self.satiety) + u16::from(self.affection) + u16::from(self.hygiene);
        #[allow(clippy::cast_possible_truncation)]
        let avg = (sum / 3) as u8;
        avg
    }

    /// Roll the daily interaction counter over if the stored day differs
    /// from `today`. Evaluated lazily at the first touch of the day; there is
    /// no scheduled midnight job.
    pub fn touch_daily(&mut self, today: NaiveDate) {
        if self.daily_day != today {
            self.daily_day = today;
            self.daily_count = 0;
        }
    }
}

/// Whether `name` is an acceptable pet name (character count within bounds).
#[must_use]
pub fn valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (NAME_MIN..=NAME_MAX).contains(&len)
}
