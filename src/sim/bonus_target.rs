//! Bonus target: a bobbing hoop near the wall that pays out extra platforms

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::feature::{Feature, FeatureContext, FeatureVisual};
use super::state::Projectile;
use crate::config::{BonusTargetConfig, Config};

/// Feature name reported in events
pub const BONUS_TARGET: &str = "bonus_target";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetState {
    /// Hidden until the countdown runs out
    Waiting { remaining: f32 },
    /// Hittable
    Active {
        base_y: f32,
        phase: f32,
        pos: Vec2,
        radius: f32,
    },
}

/// Hoop that consumes projectiles passing through it
#[derive(Debug, Clone)]
pub struct BonusTarget {
    state: TargetState,
    /// Targets collected this run
    hits: u32,
}

impl BonusTarget {
    pub fn new(config: &Config) -> Self {
        Self {
            state: TargetState::Waiting {
                remaining: config.features.bonus_target.initial_delay,
            },
            hits: 0,
        }
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Current centre if the target is showing
    pub fn position(&self) -> Option<Vec2> {
        match self.state {
            TargetState::Active { pos, .. } => Some(pos),
            TargetState::Waiting { .. } => None,
        }
    }

    fn spawn(&mut self, ctx: &mut FeatureContext<'_>) {
        let config: &Config = ctx.config;
        let cfg = &config.features.bonus_target;
        let jitter = if cfg.spawn_jitter > 0.0 {
            ctx.rng.random_range(-cfg.spawn_jitter..=cfg.spawn_jitter)
        } else {
            0.0
        };
        let floor = config.physics.ground_y + cfg.radius + cfg.bob_amplitude;
        let base_y = (ctx.human_y + cfg.spawn_height + jitter).max(floor);

        log::debug!("Bonus target spawned at y={base_y:.2}");
        self.state = TargetState::Active {
            base_y,
            phase: 0.0,
            pos: Vec2::new(cfg.x, base_y),
            radius: cfg.radius,
        };
    }

    fn despawn(&mut self, cfg: &BonusTargetConfig) {
        self.state = TargetState::Waiting {
            remaining: cfg.respawn_delay,
        };
    }
}

impl Feature for BonusTarget {
    fn name(&self) -> &'static str {
        BONUS_TARGET
    }

    fn enabled(&self, config: &Config) -> bool {
        config.features.bonus_target.enabled
    }

    fn update(&mut self, dt: f32, ctx: &mut FeatureContext<'_>) {
        let cfg = ctx.config.features.bonus_target.clone();
        match &mut self.state {
            TargetState::Waiting { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.spawn(ctx);
                }
            }
            TargetState::Active {
                base_y,
                phase,
                pos,
                radius,
            } => {
                *phase += cfg.bob_speed * dt;
                *pos = Vec2::new(cfg.x, *base_y + phase.sin() * cfg.bob_amplitude);
                *radius = cfg.radius;

                // Scrolled off the bottom: bring it back higher up later
                if *base_y + cfg.bob_amplitude + cfg.radius < ctx.camera_y {
                    self.despawn(&cfg);
                }
            }
        }
    }

    fn on_projectile(&mut self, projectile: &Projectile, ctx: &mut FeatureContext<'_>) -> bool {
        let TargetState::Active { pos, radius, .. } = self.state else {
            return false;
        };
        if projectile.pos.distance(pos) > radius {
            return false;
        }

        let cfg = ctx.config.features.bonus_target.clone();
        let granted = ctx.add_platforms(cfg.reward);
        self.hits += 1;
        self.despawn(&cfg);
        log::info!(
            "Bonus target hit by projectile {} (+{granted} platforms)",
            projectile.id
        );
        true
    }

    fn on_reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }

    fn visual(&self) -> Option<FeatureVisual> {
        match self.state {
            TargetState::Active {
                pos, radius, phase, ..
            } => Some(FeatureVisual {
                kind: BONUS_TARGET,
                pos,
                radius,
                phase,
            }),
            TargetState::Waiting { .. } => None,
        }
    }
}
