//! Per-tick integrators for the hero, projectiles and camera

use rand::Rng;

use super::state::{Hero, Projectile};
use crate::config::{CameraConfig, Config, HeroConfig, PhysicsConfig};
use crate::consts::MIN_LAUNCH_HEIGHT;

/// Apex for the next bounce: tracks the human's height so the hero always
/// rises a little above the climber.
pub fn bounce_apex<R: Rng>(human_y: f32, config: &HeroConfig, rng: &mut R) -> f32 {
    let spread = config.peak_randomness.abs();
    let jitter = if spread > 0.0 {
        rng.random_range(-spread..=spread)
    } else {
        0.0
    };
    (human_y + config.peak_offset + jitter).max(config.min_peak)
}

/// Upward speed that peaks `height` above the launch point
#[inline]
pub fn launch_speed(gravity: f32, height: f32) -> f32 {
    (2.0 * gravity * height.max(MIN_LAUNCH_HEIGHT)).sqrt()
}

/// Advance the hero. Returns the new apex when the hero hit the trampoline.
pub fn update_hero<R: Rng>(
    hero: &mut Hero,
    human_y: f32,
    config: &Config,
    rng: &mut R,
    dt: f32,
) -> Option<f32> {
    let gravity = config.physics.gravity;
    let ground = config.physics.ground_y;

    hero.squish = (hero.squish - config.hero.squish_decay * dt).max(0.0);

    hero.vel.y -= gravity * dt;
    hero.pos += hero.vel * dt;

    if hero.pos.y <= ground && hero.vel.y <= 0.0 {
        hero.pos.y = ground;
        hero.squish = 1.0;

        let apex = bounce_apex(human_y, &config.hero, rng);
        hero.vel.y = launch_speed(gravity, apex - ground);
        hero.last_apex = apex;
        hero.bounces += 1;
        return Some(apex);
    }

    None
}

/// Smoothly follow the hero, never looking below the floor
pub fn update_camera(camera_y: f32, hero_y: f32, config: &CameraConfig, dt: f32) -> f32 {
    let target = (hero_y - config.offset).max(0.0);
    let blend = (dt * config.follow_speed).clamp(0.0, 1.0);
    camera_y + (target - camera_y) * blend
}

/// Ballistic step for a thrown platform (lighter gravity than the hero)
pub fn integrate_projectile(projectile: &mut Projectile, config: &PhysicsConfig, dt: f32) {
    projectile.vel.y -= config.gravity * config.projectile_gravity_scale * dt;
    projectile.pos += projectile.vel * dt;
    projectile.rotation = projectile.vel.y.atan2(projectile.vel.x);
}

/// The projectile has reached (or passed) the wall plane
#[inline]
pub fn reached_wall(projectile: &Projectile) -> bool {
    projectile.pos.x <= 0.0
}

/// The projectile has left the tracked vertical window
pub fn out_of_range(projectile: &Projectile, camera_y: f32, config: &Config) -> bool {
    let floor = config.physics.ground_y - config.physics.floor_margin;
    let ceiling = camera_y + config.camera.view_height + config.physics.ceiling_margin;
    projectile.pos.y < floor || projectile.pos.y > ceiling
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn hero_config(offset: f32, randomness: f32, min_peak: f32) -> HeroConfig {
        HeroConfig {
            peak_offset: offset,
            peak_randomness: randomness,
            min_peak,
            ..Default::default()
        }
    }

    #[test]
    fn test_launch_speed_reaches_height() {
        let v = launch_speed(14.0, 2.0);
        // v² / 2g == h
        assert!((v * v / (2.0 * 14.0) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_launch_speed_floors_height() {
        let floor = launch_speed(14.0, MIN_LAUNCH_HEIGHT);
        assert_eq!(launch_speed(14.0, -5.0), floor);
        assert_eq!(launch_speed(14.0, 0.0), floor);
        assert!(floor.is_finite() && floor > 0.0);
    }

    #[test]
    fn test_apex_without_randomness() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = hero_config(2.0, 0.0, 1.6);
        assert_eq!(bounce_apex(0.0, &config, &mut rng), 2.0);
        assert_eq!(bounce_apex(5.0, &config, &mut rng), 7.0);
    }

    #[test]
    fn test_apex_respects_min_peak() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = hero_config(0.5, 0.0, 1.6);
        assert_eq!(bounce_apex(0.0, &config, &mut rng), 1.6);
    }

    #[test]
    fn test_hero_bounces_off_ground() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut hero = Hero::new(&config);

        let apex = update_hero(&mut hero, 0.0, &config, &mut rng, 1.0 / 60.0);
        let apex = apex.expect("resting hero should bounce on the first tick");
        assert!((1.6..=2.5).contains(&apex));
        assert_eq!(hero.pos.y, 0.0);
        assert_eq!(hero.squish, 1.0);
        assert!(hero.vel.y > 0.0);
        assert_eq!(hero.bounces, 1);
    }

    #[test]
    fn test_hero_flight_peaks_near_apex() {
        let mut config = Config::default();
        config.hero.peak_randomness = 0.0;
        let mut rng = Pcg32::seed_from_u64(7);
        let mut hero = Hero::new(&config);
        let dt = 1.0 / 240.0;

        update_hero(&mut hero, 0.0, &config, &mut rng, dt);
        let mut peak: f32 = 0.0;
        for _ in 0..2000 {
            if update_hero(&mut hero, 0.0, &config, &mut rng, dt).is_some() {
                break;
            }
            peak = peak.max(hero.pos.y);
        }
        assert!((peak - 2.0).abs() < 0.1, "peak was {peak}");
    }

    #[test]
    fn test_squish_decays_to_zero() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut hero = Hero::new(&config);
        update_hero(&mut hero, 0.0, &config, &mut rng, 1.0 / 60.0);
        for _ in 0..30 {
            update_hero(&mut hero, 0.0, &config, &mut rng, 1.0 / 60.0);
        }
        assert_eq!(hero.squish, 0.0);
    }

    #[test]
    fn test_camera_never_targets_below_floor() {
        let config = CameraConfig::default();
        let y = update_camera(0.0, 1.0, &config, 1.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_camera_blends_toward_target() {
        let config = CameraConfig {
            offset: 2.0,
            follow_speed: 5.0,
            ..Default::default()
        };
        let y = update_camera(0.0, 12.0, &config, 0.1);
        assert!((y - 5.0).abs() < 1e-5);
        // Huge dt snaps straight to target
        assert_eq!(update_camera(0.0, 12.0, &config, 10.0), 10.0);
    }

    #[test]
    fn test_projectile_uses_reduced_gravity() {
        let config = PhysicsConfig::default();
        let mut p = Projectile::launch(1, Vec2::new(3.0, 1.0), Vec2::new(-9.0, 0.0), 0.0);
        integrate_projectile(&mut p, &config, 0.1);
        assert!((p.vel.y - (-14.0 * 0.85 * 0.1)).abs() < 1e-5);
        assert!(p.pos.x < 3.0);
        assert!(p.rotation.abs() > std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_out_of_range_window() {
        let config = Config::default();
        let mut p = Projectile::launch(1, Vec2::new(1.0, 5.0), Vec2::ZERO, 0.0);
        assert!(!out_of_range(&p, 0.0, &config));
        p.pos.y = -2.5;
        assert!(out_of_range(&p, 0.0, &config));
        p.pos.y = 16.5;
        assert!(out_of_range(&p, 0.0, &config));
        assert!(!out_of_range(&p, 10.0, &config));
    }

    proptest! {
        #[test]
        fn prop_apex_within_band(
            human_y in 0.0f32..50.0,
            offset in 0.0f32..5.0,
            randomness in 0.0f32..2.0,
            min_peak in 0.0f32..10.0,
            seed in any::<u64>(),
        ) {
            let config = hero_config(offset, randomness, min_peak);
            let mut rng = Pcg32::seed_from_u64(seed);
            let apex = bounce_apex(human_y, &config, &mut rng);
            let lo = min_peak.max(human_y + offset - randomness);
            let hi = min_peak.max(human_y + offset + randomness);
            prop_assert!(apex >= lo - 1e-4 && apex <= hi + 1e-4);
        }

        #[test]
        fn prop_launch_speed_is_finite(gravity in 0.1f32..100.0, height in -100.0f32..100.0) {
            let v = launch_speed(gravity, height);
            prop_assert!(v.is_finite() && v > 0.0);
        }
    }
}
