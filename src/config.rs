//! Configuration for the pawbond engine.
//!
//! Maps directly to `pawbond.toml`. Every value has a default, so an empty
//! file (or no file at all) yields the stock tuning.

use serde::{Deserialize, Serialize};

/// Top-level pawbond configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PawbondConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Action cooldown settings.
    #[serde(default)]
    pub action: ActionConfig,
    /// Experience and level-up settings.
    #[serde(default)]
    pub leveling: LevelingConfig,
    /// Idle stat decay and distress settings.
    #[serde(default)]
    pub decay: DecayConfig,
    /// Persistence / save settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl PawbondConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PawbondError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::PawbondError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether the engine is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Action cooldown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Minimum seconds between two accepted actions on the same pet.
    /// Guards against spam-clicking by either partner.
    #[serde(default = "default_3")]
    pub cooldown_seconds: u64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self { cooldown_seconds: 3 }
    }
}

/// Experience and level-up configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelingConfig {
    /// XP required per level. Resolved XP always stays below this.
    #[serde(default = "default_100")]
    pub xp_threshold: u32,
    /// Stat bonus granted to satiety and affection on each level-up.
    #[serde(default = "default_10")]
    pub level_bonus: i16,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            xp_threshold: 100,
            level_bonus: 10,
        }
    }
}

/// Idle decay and distress notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// How often the background sweep runs, in seconds.
    #[serde(default = "default_300")]
    pub sweep_interval_seconds: u64,
    /// Minimum idle minutes before any decay is applied.
    #[serde(default = "default_30_i64")]
    pub min_idle_minutes: i64,
    /// Satiety lost per idle hour.
    #[serde(default = "default_6_0")]
    pub satiety_per_hour: f64,
    /// Affection lost per idle hour.
    #[serde(default = "default_4_0")]
    pub affection_per_hour: f64,
    /// Hygiene lost per idle hour.
    #[serde(default = "default_3_5")]
    pub hygiene_per_hour: f64,
    /// Stat average below which the pet is considered distressed.
    #[serde(default = "default_30_u8")]
    pub distress_threshold: u8,
    /// Minimum minutes between two distress notifications for one pet.
    #[serde(default = "default_240")]
    pub distress_cooldown_minutes: i64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: 300,
            min_idle_minutes: 30,
            satiety_per_hour: 6.0,
            affection_per_hour: 4.0,
            hygiene_per_hour: 3.5,
            distress_threshold: 30,
            distress_cooldown_minutes: 240,
        }
    }
}

/// Persistence / save configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Detect save corruption via checksums.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
    /// Number of rotating backups to keep.
    #[serde(default = "default_3_u32")]
    pub backup_count: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            wal_mode: true,
            checksum_enabled: true,
            backup_count: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_3() -> u64 { 3 }
fn default_3_u32() -> u32 { 3 }
fn default_10() -> i16 { 10 }
fn default_30_i64() -> i64 { 30 }
fn default_30_u8() -> u8 { 30 }
fn default_100() -> u32 { 100 }
fn default_240() -> i64 { 240 }
fn default_300() -> u64 { 300 }
fn default_3_5() -> f64 { 3.5 }
fn default_4_0() -> f64 { 4.0 }
fn default_6_0() -> f64 { 6.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_values() {
        let config = PawbondConfig::default();
        assert_eq!(config.action.cooldown_seconds, 3);
        assert_eq!(config.leveling.xp_threshold, 100);
        assert_eq!(config.leveling.level_bonus, 10);
        assert_eq!(config.decay.sweep_interval_seconds, 300);
        assert_eq!(config.decay.min_idle_minutes, 30);
        assert!((config.decay.satiety_per_hour - 6.0).abs() < f64::EPSILON);
        assert!((config.decay.affection_per_hour - 4.0).abs() < f64::EPSILON);
        assert!((config.decay.hygiene_per_hour - 3.5).abs() < f64::EPSILON);
        assert_eq!(config.decay.distress_threshold, 30);
        assert!(config.persistence.wal_mode);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = PawbondConfig::from_toml("").expect("parse");
        assert_eq!(config.leveling.xp_threshold, 100);
        assert!(config.general.enabled);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = PawbondConfig::from_toml(
            r#"
            [action]
            cooldown_seconds = 10

            [decay]
            min_idle_minutes = 60
            "#,
        )
        .expect("parse");
        assert_eq!(config.action.cooldown_seconds, 10);
        assert_eq!(config.decay.min_idle_minutes, 60);
        // Untouched sections keep defaults.
        assert_eq!(config.decay.sweep_interval_seconds, 300);
        assert_eq!(config.leveling.level_bonus, 10);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = PawbondConfig::from_toml("[action\ncooldown_seconds = ").unwrap_err();
        assert!(matches!(err, crate::PawbondError::Config(_)));
    }
}
