//! Game tuning parameters
//!
//! Persisted separately from high scores through a [`KeyValueStore`]. Every
//! section is `#[serde(default)]` so a partial or older save always merges into
//! a complete structure before the simulation sees it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{KeyValueStore, StoreError};

/// Physics constants shared by hero and projectiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (m/s²)
    pub gravity: f32,
    /// Trampoline contact height
    pub ground_y: f32,
    /// Fraction of gravity applied to thrown projectiles
    pub projectile_gravity_scale: f32,
    /// How far below the ground a projectile may fall before it is dropped
    pub floor_margin: f32,
    /// How far above the visible window a projectile may rise before it is dropped
    pub ceiling_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 14.0,
            ground_y: 0.0,
            projectile_gravity_scale: 0.85,
            floor_margin: 2.0,
            ceiling_margin: 4.0,
        }
    }
}

/// Hero bounce tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Horizontal distance from the wall
    pub x: f32,
    /// Apex height above the human's current height
    pub peak_offset: f32,
    /// Uniform jitter applied to each apex (±)
    pub peak_randomness: f32,
    /// Lowest apex the hero will ever bounce to
    pub min_peak: f32,
    /// Squish recovery per second
    pub squish_decay: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            x: 3.0,
            peak_offset: 2.0,
            peak_randomness: 0.5,
            min_peak: 1.6,
            squish_decay: 4.0,
        }
    }
}

/// Projectile launch tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    /// Horizontal speed toward the wall (m/s)
    pub speed: f32,
    /// Minimum time between throws (seconds)
    pub cooldown: f32,
    /// Lower bound of the random upward launch component
    pub arc_min: f32,
    /// Upper bound of the random upward launch component
    pub arc_max: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            speed: 9.0,
            cooldown: 0.35,
            arc_min: 0.5,
            arc_max: 1.5,
        }
    }
}

/// Platform budget and dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Budget at the start of a run
    pub initial: u32,
    /// Cap applied when platforms are granted mid-run
    pub max: u32,
    /// Ledge width (rendering / footing)
    pub width: f32,
    /// Ledge thickness
    pub thickness: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            initial: 8,
            max: 12,
            width: 1.2,
            thickness: 0.2,
        }
    }
}

/// Human climber tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanConfig {
    /// Largest vertical gap climbed in one jump
    pub jump_threshold: f32,
    /// Duration of the airborne part of a jump
    pub jump_duration: f32,
    /// Height of the cosmetic arc layered on the eased climb
    pub jump_arc: f32,
    /// Crouch time before the jump commits to motion
    pub jump_prep: f32,
    /// How long the human frets over an unreachable platform
    pub worry_duration: f32,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            jump_threshold: 2.0,
            jump_duration: 0.45,
            jump_arc: 0.4,
            jump_prep: 0.1,
            worry_duration: 1.2,
        }
    }
}

/// Camera follow tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance the camera trails below the hero
    pub offset: f32,
    /// Exponential follow rate (1/s)
    pub follow_speed: f32,
    /// Visible world height
    pub view_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: 3.0,
            follow_speed: 4.0,
            view_height: 12.0,
        }
    }
}

/// Bonus target feature tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusTargetConfig {
    pub enabled: bool,
    /// Platforms granted per hit
    pub reward: u32,
    /// Hit radius around the target centre
    pub radius: f32,
    /// Horizontal distance from the wall
    pub x: f32,
    /// Spawn height above the human
    pub spawn_height: f32,
    /// Uniform spawn height jitter (±)
    pub spawn_jitter: f32,
    pub bob_amplitude: f32,
    /// Bob angular speed (rad/s)
    pub bob_speed: f32,
    /// Delay before a collected target reappears
    pub respawn_delay: f32,
    /// Delay before the first target of a run appears
    pub initial_delay: f32,
}

impl Default for BonusTargetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reward: 2,
            radius: 0.5,
            x: 1.2,
            spawn_height: 3.0,
            spawn_jitter: 1.0,
            bob_amplitude: 0.4,
            bob_speed: 2.0,
            respawn_delay: 5.0,
            initial_delay: 3.0,
        }
    }
}

/// Optional gameplay features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub bonus_target: BonusTargetConfig,
}

/// HUD timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long the "tap to throw" prompt stays up if the player never throws
    pub prompt_duration: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt_duration: 4.0,
        }
    }
}

/// Complete tuning tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub hero: HeroConfig,
    pub throw: ThrowConfig,
    pub platforms: PlatformConfig,
    pub human: HumanConfig,
    pub camera: CameraConfig,
    pub features: FeaturesConfig,
    pub ui: UiConfig,
}

/// A value read from or written to a config key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f32),
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        ConfigValue::Number(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

/// Errors raised by key-addressed config edits
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("config key {key} expects a {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },

    #[error("config key {0} requires a finite number")]
    NotFinite(&'static str),
}

/// Every tunable field, addressable by dotted path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Gravity,
    GroundY,
    ProjectileGravityScale,
    FloorMargin,
    CeilingMargin,
    HeroX,
    PeakOffset,
    PeakRandomness,
    MinPeak,
    SquishDecay,
    ThrowSpeed,
    ThrowCooldown,
    ThrowArcMin,
    ThrowArcMax,
    PlatformsInitial,
    PlatformsMax,
    PlatformWidth,
    PlatformThickness,
    JumpThreshold,
    JumpDuration,
    JumpArc,
    JumpPrep,
    WorryDuration,
    CameraOffset,
    CameraFollowSpeed,
    CameraViewHeight,
    BonusEnabled,
    BonusReward,
    BonusRadius,
    BonusX,
    BonusSpawnHeight,
    BonusSpawnJitter,
    BonusBobAmplitude,
    BonusBobSpeed,
    BonusRespawnDelay,
    BonusInitialDelay,
    PromptDuration,
}

/// Static key table; the settings UI iterates this to build its controls
pub const CONFIG_KEYS: &[(&str, ConfigKey)] = &[
    ("physics.gravity", ConfigKey::Gravity),
    ("physics.ground_y", ConfigKey::GroundY),
    ("physics.projectile_gravity_scale", ConfigKey::ProjectileGravityScale),
    ("physics.floor_margin", ConfigKey::FloorMargin),
    ("physics.ceiling_margin", ConfigKey::CeilingMargin),
    ("hero.x", ConfigKey::HeroX),
    ("hero.peak_offset", ConfigKey::PeakOffset),
    ("hero.peak_randomness", ConfigKey::PeakRandomness),
    ("hero.min_peak", ConfigKey::MinPeak),
    ("hero.squish_decay", ConfigKey::SquishDecay),
    ("throw.speed", ConfigKey::ThrowSpeed),
    ("throw.cooldown", ConfigKey::ThrowCooldown),
    ("throw.arc_min", ConfigKey::ThrowArcMin),
    ("throw.arc_max", ConfigKey::ThrowArcMax),
    ("platforms.initial", ConfigKey::PlatformsInitial),
    ("platforms.max", ConfigKey::PlatformsMax),
    ("platforms.width", ConfigKey::PlatformWidth),
    ("platforms.thickness", ConfigKey::PlatformThickness),
    ("human.jump_threshold", ConfigKey::JumpThreshold),
    ("human.jump_duration", ConfigKey::JumpDuration),
    ("human.jump_arc", ConfigKey::JumpArc),
    ("human.jump_prep", ConfigKey::JumpPrep),
    ("human.worry_duration", ConfigKey::WorryDuration),
    ("camera.offset", ConfigKey::CameraOffset),
    ("camera.follow_speed", ConfigKey::CameraFollowSpeed),
    ("camera.view_height", ConfigKey::CameraViewHeight),
    ("features.bonus_target.enabled", ConfigKey::BonusEnabled),
    ("features.bonus_target.reward", ConfigKey::BonusReward),
    ("features.bonus_target.radius", ConfigKey::BonusRadius),
    ("features.bonus_target.x", ConfigKey::BonusX),
    ("features.bonus_target.spawn_height", ConfigKey::BonusSpawnHeight),
    ("features.bonus_target.spawn_jitter", ConfigKey::BonusSpawnJitter),
    ("features.bonus_target.bob_amplitude", ConfigKey::BonusBobAmplitude),
    ("features.bonus_target.bob_speed", ConfigKey::BonusBobSpeed),
    ("features.bonus_target.respawn_delay", ConfigKey::BonusRespawnDelay),
    ("features.bonus_target.initial_delay", ConfigKey::BonusInitialDelay),
    ("ui.prompt_duration", ConfigKey::PromptDuration),
];

/// Mutable view of one config field
enum Field<'a> {
    Number(&'a mut f32),
    Count(&'a mut u32),
    Flag(&'a mut bool),
}

impl ConfigKey {
    /// Look up a key by dotted path
    pub fn from_path(path: &str) -> Option<Self> {
        CONFIG_KEYS
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, key)| *key)
    }

    /// Dotted path of this key
    pub fn path(self) -> &'static str {
        CONFIG_KEYS
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(p, _)| *p)
            .unwrap_or("<unlisted>")
    }

    /// Accepted numeric range (inclusive). Flags ignore this.
    pub fn range(self) -> (f32, f32) {
        use ConfigKey::*;
        match self {
            Gravity => (0.1, 100.0),
            GroundY => (0.0, 10.0),
            ProjectileGravityScale => (0.0, 2.0),
            FloorMargin | CeilingMargin => (0.0, 50.0),
            HeroX => (0.1, 20.0),
            PeakOffset | PeakRandomness | MinPeak => (0.0, 50.0),
            SquishDecay => (0.0, 100.0),
            ThrowSpeed => (0.1, 100.0),
            ThrowCooldown => (0.0, 10.0),
            ThrowArcMin | ThrowArcMax => (0.0, 30.0),
            PlatformsInitial | PlatformsMax => (0.0, 999.0),
            PlatformWidth | PlatformThickness => (0.0, 10.0),
            JumpThreshold | JumpArc => (0.0, 50.0),
            JumpDuration | JumpPrep | WorryDuration => (0.0, 10.0),
            CameraOffset => (0.0, 50.0),
            CameraFollowSpeed => (0.0, 100.0),
            CameraViewHeight => (1.0, 200.0),
            BonusEnabled => (0.0, 1.0),
            BonusReward => (0.0, 99.0),
            BonusRadius | BonusX | BonusBobAmplitude => (0.0, 10.0),
            BonusSpawnHeight | BonusSpawnJitter => (0.0, 50.0),
            BonusBobSpeed => (0.0, 50.0),
            BonusRespawnDelay | BonusInitialDelay | PromptDuration => (0.0, 600.0),
        }
    }
}

impl Config {
    /// LocalStorage / file key
    pub const STORAGE_KEY: &'static str = "bounce_climb_config";

    fn field(&mut self, key: ConfigKey) -> Field<'_> {
        use ConfigKey::*;
        let bonus = &mut self.features.bonus_target;
        match key {
            Gravity => Field::Number(&mut self.physics.gravity),
            GroundY => Field::Number(&mut self.physics.ground_y),
            ProjectileGravityScale => Field::Number(&mut self.physics.projectile_gravity_scale),
            FloorMargin => Field::Number(&mut self.physics.floor_margin),
            CeilingMargin => Field::Number(&mut self.physics.ceiling_margin),
            HeroX => Field::Number(&mut self.hero.x),
            PeakOffset => Field::Number(&mut self.hero.peak_offset),
            PeakRandomness => Field::Number(&mut self.hero.peak_randomness),
            MinPeak => Field::Number(&mut self.hero.min_peak),
            SquishDecay => Field::Number(&mut self.hero.squish_decay),
            ThrowSpeed => Field::Number(&mut self.throw.speed),
            ThrowCooldown => Field::Number(&mut self.throw.cooldown),
            ThrowArcMin => Field::Number(&mut self.throw.arc_min),
            ThrowArcMax => Field::Number(&mut self.throw.arc_max),
            PlatformsInitial => Field::Count(&mut self.platforms.initial),
            PlatformsMax => Field::Count(&mut self.platforms.max),
            PlatformWidth => Field::Number(&mut self.platforms.width),
            PlatformThickness => Field::Number(&mut self.platforms.thickness),
            JumpThreshold => Field::Number(&mut self.human.jump_threshold),
            JumpDuration => Field::Number(&mut self.human.jump_duration),
            JumpArc => Field::Number(&mut self.human.jump_arc),
            JumpPrep => Field::Number(&mut self.human.jump_prep),
            WorryDuration => Field::Number(&mut self.human.worry_duration),
            CameraOffset => Field::Number(&mut self.camera.offset),
            CameraFollowSpeed => Field::Number(&mut self.camera.follow_speed),
            CameraViewHeight => Field::Number(&mut self.camera.view_height),
            BonusEnabled => Field::Flag(&mut bonus.enabled),
            BonusReward => Field::Count(&mut bonus.reward),
            BonusRadius => Field::Number(&mut bonus.radius),
            BonusX => Field::Number(&mut bonus.x),
            BonusSpawnHeight => Field::Number(&mut bonus.spawn_height),
            BonusSpawnJitter => Field::Number(&mut bonus.spawn_jitter),
            BonusBobAmplitude => Field::Number(&mut bonus.bob_amplitude),
            BonusBobSpeed => Field::Number(&mut bonus.bob_speed),
            BonusRespawnDelay => Field::Number(&mut bonus.respawn_delay),
            BonusInitialDelay => Field::Number(&mut bonus.initial_delay),
            PromptDuration => Field::Number(&mut self.ui.prompt_duration),
        }
    }

    /// Read a value by dotted path
    pub fn get(&self, path: &str) -> Result<ConfigValue, ConfigError> {
        let key = ConfigKey::from_path(path).ok_or_else(|| ConfigError::UnknownKey(path.into()))?;
        Ok(self.get_key(key))
    }

    /// Read a value by key
    pub fn get_key(&self, key: ConfigKey) -> ConfigValue {
        use ConfigKey::*;
        use ConfigValue::Number;
        let bonus = &self.features.bonus_target;
        match key {
            Gravity => Number(self.physics.gravity),
            GroundY => Number(self.physics.ground_y),
            ProjectileGravityScale => Number(self.physics.projectile_gravity_scale),
            FloorMargin => Number(self.physics.floor_margin),
            CeilingMargin => Number(self.physics.ceiling_margin),
            HeroX => Number(self.hero.x),
            PeakOffset => Number(self.hero.peak_offset),
            PeakRandomness => Number(self.hero.peak_randomness),
            MinPeak => Number(self.hero.min_peak),
            SquishDecay => Number(self.hero.squish_decay),
            ThrowSpeed => Number(self.throw.speed),
            ThrowCooldown => Number(self.throw.cooldown),
            ThrowArcMin => Number(self.throw.arc_min),
            ThrowArcMax => Number(self.throw.arc_max),
            PlatformsInitial => Number(self.platforms.initial as f32),
            PlatformsMax => Number(self.platforms.max as f32),
            PlatformWidth => Number(self.platforms.width),
            PlatformThickness => Number(self.platforms.thickness),
            JumpThreshold => Number(self.human.jump_threshold),
            JumpDuration => Number(self.human.jump_duration),
            JumpArc => Number(self.human.jump_arc),
            JumpPrep => Number(self.human.jump_prep),
            WorryDuration => Number(self.human.worry_duration),
            CameraOffset => Number(self.camera.offset),
            CameraFollowSpeed => Number(self.camera.follow_speed),
            CameraViewHeight => Number(self.camera.view_height),
            BonusEnabled => ConfigValue::Bool(bonus.enabled),
            BonusReward => Number(bonus.reward as f32),
            BonusRadius => Number(bonus.radius),
            BonusX => Number(bonus.x),
            BonusSpawnHeight => Number(bonus.spawn_height),
            BonusSpawnJitter => Number(bonus.spawn_jitter),
            BonusBobAmplitude => Number(bonus.bob_amplitude),
            BonusBobSpeed => Number(bonus.bob_speed),
            BonusRespawnDelay => Number(bonus.respawn_delay),
            BonusInitialDelay => Number(bonus.initial_delay),
            PromptDuration => Number(self.ui.prompt_duration),
        }
    }

    /// Write a value by dotted path. Numbers are clamped into the key's range;
    /// the stored value is returned.
    pub fn set(&mut self, path: &str, value: ConfigValue) -> Result<ConfigValue, ConfigError> {
        let key = ConfigKey::from_path(path).ok_or_else(|| ConfigError::UnknownKey(path.into()))?;
        self.set_key(key, value)
    }

    /// Write a value by key
    pub fn set_key(&mut self, key: ConfigKey, value: ConfigValue) -> Result<ConfigValue, ConfigError> {
        let (lo, hi) = key.range();
        match (self.field(key), value) {
            (Field::Flag(slot), ConfigValue::Bool(b)) => {
                *slot = b;
                Ok(ConfigValue::Bool(b))
            }
            (Field::Flag(_), ConfigValue::Number(_)) => Err(ConfigError::TypeMismatch {
                key: key.path(),
                expected: "boolean",
            }),
            (Field::Number(_) | Field::Count(_), ConfigValue::Bool(_)) => {
                Err(ConfigError::TypeMismatch {
                    key: key.path(),
                    expected: "number",
                })
            }
            (_, ConfigValue::Number(v)) if !v.is_finite() => Err(ConfigError::NotFinite(key.path())),
            (Field::Number(slot), ConfigValue::Number(v)) => {
                *slot = v.clamp(lo, hi);
                Ok(ConfigValue::Number(*slot))
            }
            (Field::Count(slot), ConfigValue::Number(v)) => {
                *slot = v.round().clamp(lo, hi) as u32;
                Ok(ConfigValue::Number(*slot as f32))
            }
        }
    }

    /// Clamp every field into its range (used after loading untrusted data)
    pub fn sanitize(&mut self) {
        let defaults = Config::default();
        for &(_, key) in CONFIG_KEYS {
            let value = self.get_key(key);
            let clamped = match value {
                ConfigValue::Number(v) if !v.is_finite() => {
                    log::warn!("Config {} was not finite, using default", key.path());
                    defaults.get_key(key)
                }
                other => other,
            };
            if let Err(e) = self.set_key(key, clamped) {
                log::warn!("Config {} could not be sanitized: {e}", key.path());
            }
        }
    }

    /// Parse a JSON document, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut config: Config = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load config from a store; any failure falls back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from storage");
                    return config;
                }
                Err(e) => log::warn!("Stored config unreadable ({e}), using defaults"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Config storage unavailable ({e}), using defaults"),
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_every_key_round_trips_through_table() {
        for &(path, key) in CONFIG_KEYS {
            assert_eq!(ConfigKey::from_path(path), Some(key));
            assert_eq!(key.path(), path);
        }
    }

    #[test]
    fn test_get_defaults() {
        let config = Config::default();
        assert_eq!(config.get("physics.gravity"), Ok(ConfigValue::Number(14.0)));
        assert_eq!(
            config.get("features.bonus_target.enabled"),
            Ok(ConfigValue::Bool(true))
        );
        assert_eq!(config.get("platforms.initial"), Ok(ConfigValue::Number(8.0)));
    }

    #[test]
    fn test_set_clamps_negative_values() {
        let mut config = Config::default();
        let stored = config.set("throw.cooldown", ConfigValue::Number(-3.0)).unwrap();
        assert_eq!(stored, ConfigValue::Number(0.0));
        assert_eq!(config.throw.cooldown, 0.0);
    }

    #[test]
    fn test_set_count_rounds() {
        let mut config = Config::default();
        config.set("platforms.max", ConfigValue::Number(4.6)).unwrap();
        assert_eq!(config.platforms.max, 5);
        config.set("platforms.initial", ConfigValue::Number(-2.0)).unwrap();
        assert_eq!(config.platforms.initial, 0);
    }

    #[test]
    fn test_get_key_matches_every_field_after_set() {
        let mut config = Config::default();
        for (i, &(path, key)) in CONFIG_KEYS.iter().enumerate() {
            let value = match config.get_key(key) {
                ConfigValue::Bool(b) => ConfigValue::Bool(!b),
                ConfigValue::Number(_) => ConfigValue::Number(1.0 + i as f32 / 10.0),
            };
            let stored = config.set(path, value).unwrap();
            assert_eq!(config.get_key(key), stored, "{path}");
        }
    }

    #[test]
    fn test_sanitize_replaces_non_finite_with_default() {
        let mut config = Config::default();
        config.camera.follow_speed = f32::INFINITY;
        config.hero.min_peak = -4.0;
        config.sanitize();
        assert_eq!(config.camera.follow_speed, CameraConfig::default().follow_speed);
        assert_eq!(config.hero.min_peak, 0.0);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        assert_eq!(
            config.set("hero.wings", ConfigValue::Number(1.0)),
            Err(ConfigError::UnknownKey("hero.wings".into()))
        );
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("physics.gravity", true.into()),
            Err(ConfigError::TypeMismatch { .. })
        ));
        assert!(matches!(
            config.set("features.bonus_target.enabled", ConfigValue::Number(1.0)),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_rejects_nan() {
        let mut config = Config::default();
        assert_eq!(
            config.set("physics.gravity", ConfigValue::Number(f32::NAN)),
            Err(ConfigError::NotFinite("physics.gravity"))
        );
        assert_eq!(config.physics.gravity, 14.0);
    }

    #[test]
    fn test_partial_json_merges_defaults() {
        let config = Config::from_json(r#"{ "human": { "jump_threshold": 3.5 } }"#).unwrap();
        assert_eq!(config.human.jump_threshold, 3.5);
        assert_eq!(config.human.jump_duration, HumanConfig::default().jump_duration);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_from_json_sanitizes() {
        let config = Config::from_json(r#"{ "throw": { "speed": -5.0 } }"#).unwrap();
        assert_eq!(config.throw.speed, 0.1);
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let mut store = MemoryStore::new();
        store.set(Config::STORAGE_KEY, "not json").unwrap();
        assert_eq!(Config::load(&store), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut config = Config::default();
        config.set("camera.follow_speed", ConfigValue::Number(7.0)).unwrap();
        config.save(&mut store).unwrap();
        assert_eq!(Config::load(&store), config);
    }
}
