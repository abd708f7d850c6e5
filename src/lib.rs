//! Bounce Climb - trampoline-powered wall climbing arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hero, projectiles, human, features, run controller)
//! - `config`: Tunable parameter tree with key-addressable edits
//! - `highscores`: Top-N leaderboard
//! - `persistence`: Key-value storage backends
//! - `platform`: Browser/native platform abstraction

pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::{Config, ConfigError, ConfigKey, ConfigValue};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Default simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted by a single tick (backgrounded tabs etc.)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Floor for the height-from-ground term of the launch velocity
    pub const MIN_LAUNCH_HEIGHT: f32 = 0.1;

    /// Tolerance when comparing accumulated simulation time against cooldowns
    pub const TIME_EPSILON: f64 = 1e-6;
}

/// Cubic ease-in-out on [0, 1]
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_clamps() {
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}
