//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (registration / launch order)
//! - No rendering or platform dependencies

pub mod bonus_target;
pub mod feature;
pub mod human;
pub mod physics;
pub mod state;
pub mod tick;

pub use bonus_target::{BONUS_TARGET, BonusTarget, TargetState};
pub use feature::{Feature, FeatureContext, FeatureVisual};
pub use human::{HumanUpdate, Placement, find_jump_target};
pub use state::{
    GameEvent, GameState, Hero, Human, HumanState, HumanStateKind, Jump, JumpPhase, Platform,
    PlatformBudget, Projectile, RunMode,
};
pub use tick::{Run, TickInput, autoplay_wants_throw};
