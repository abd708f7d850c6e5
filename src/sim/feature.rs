//! Pluggable gameplay features
//!
//! A feature observes the run without the controller knowing its concrete
//! type. Features are ticked in registration order and offered every live
//! projectile; the first one to claim a projectile ends its flight.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::state::{GameEvent, PlatformBudget, Projectile, queue_event};
use crate::config::Config;

/// What a renderer should draw for a feature this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVisual {
    pub kind: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    /// Animation clock the renderer may use for pulsing/bobbing
    pub phase: f32,
}

/// Slice of the run a feature may read or influence
pub struct FeatureContext<'a> {
    /// Config snapshot for this tick
    pub config: &'a Config,
    pub human_y: f32,
    pub camera_y: f32,
    /// Run clock (seconds)
    pub time: f64,
    pub rng: &'a mut Pcg32,
    budget: &'a mut PlatformBudget,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> FeatureContext<'a> {
    pub fn new(
        config: &'a Config,
        human_y: f32,
        camera_y: f32,
        time: f64,
        rng: &'a mut Pcg32,
        budget: &'a mut PlatformBudget,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            config,
            human_y,
            camera_y,
            time,
            rng,
            budget,
            events,
        }
    }

    /// Grant extra throws, capped at `platforms.max`. Returns how many were added.
    pub fn add_platforms(&mut self, amount: u32) -> u32 {
        let granted = self.budget.add(amount, self.config.platforms.max);
        queue_event(
            self.events,
            GameEvent::BudgetChanged {
                left: self.budget.left,
            },
        );
        granted
    }
}

/// Capability set every feature implements
pub trait Feature {
    /// Stable name used in events and logs
    fn name(&self) -> &'static str;

    /// Whether the feature is switched on in this config snapshot.
    /// Disabled features are neither ticked, offered projectiles, nor drawn.
    fn enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Advance internal timers once per tick
    fn update(&mut self, dt: f32, ctx: &mut FeatureContext<'_>);

    /// Claim a projectile. Returning `true` consumes it.
    fn on_projectile(&mut self, _projectile: &Projectile, _ctx: &mut FeatureContext<'_>) -> bool {
        false
    }

    /// Clear per-run state. Must be idempotent.
    fn on_reset(&mut self, _config: &Config) {}

    /// Render hook: what to draw, if anything
    fn visual(&self) -> Option<FeatureVisual> {
        None
    }
}
