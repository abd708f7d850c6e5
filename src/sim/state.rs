//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here; the run controller
//! in `tick` is the only writer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{Config, HumanConfig};

/// Current mode of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Active gameplay
    Playing,
    /// Frozen; ticks are ignored
    Paused,
    /// Budget spent, nothing in flight, human settled
    GameOver,
}

/// The bouncing hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Trampoline compression (1 at contact, decays to 0)
    pub squish: f32,
    /// Apex targeted by the most recent bounce
    pub last_apex: f32,
    /// Ground contacts this run
    pub bounces: u32,
}

impl Hero {
    /// Hero resting on the trampoline
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec2::new(config.hero.x, config.physics.ground_y),
            vel: Vec2::ZERO,
            squish: 0.0,
            last_apex: config.physics.ground_y,
            bounces: 0,
        }
    }
}

/// An in-flight climb from one height to a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jump {
    /// Platform being jumped to
    pub platform_id: u32,
    pub start: f32,
    pub target: f32,
    /// Seconds since the jump began (including prep)
    pub elapsed: f32,
}

/// Animation phase of a jump, derived from elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Crouching; height not yet moving
    Prep,
    Ascend,
    Descend,
}

/// Human behaviour state. Exactly one at a time by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HumanState {
    Idle,
    Jumping(Jump),
    /// Upset by a platform out of reach
    Worry { remaining: f32 },
}

/// Discriminant of [`HumanState`] for display and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanStateKind {
    Idle,
    Jumping,
    Worry,
}

/// The climbing human
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Human {
    /// Current height on the wall
    pub y: f32,
    pub state: HumanState,
}

impl Default for Human {
    fn default() -> Self {
        Self {
            y: 0.0,
            state: HumanState::Idle,
        }
    }
}

impl Human {
    pub fn kind(&self) -> HumanStateKind {
        match self.state {
            HumanState::Idle => HumanStateKind::Idle,
            HumanState::Jumping(_) => HumanStateKind::Jumping,
            HumanState::Worry { .. } => HumanStateKind::Worry,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, HumanState::Idle)
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.state, HumanState::Jumping(_))
    }

    pub fn is_worried(&self) -> bool {
        matches!(self.state, HumanState::Worry { .. })
    }

    /// Phase of the current jump, if any
    pub fn jump_phase(&self, config: &HumanConfig) -> Option<JumpPhase> {
        let HumanState::Jumping(jump) = self.state else {
            return None;
        };
        let motion = jump.elapsed - config.jump_prep;
        if motion < 0.0 {
            return Some(JumpPhase::Prep);
        }
        if config.jump_duration <= 0.0 || motion / config.jump_duration >= 0.5 {
            Some(JumpPhase::Descend)
        } else {
            Some(JumpPhase::Ascend)
        }
    }
}

/// A ledge stuck to the wall. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Attachment height on the wall
    pub y: f32,
    /// Run clock when the platform stuck
    pub created_at: f64,
}

/// A thrown platform in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading of travel (radians)
    pub rotation: f32,
    /// Cleared exactly once when the projectile resolves
    pub active: bool,
    /// Run clock at launch
    pub launched_at: f64,
    /// Launch x, for spin/progress animation
    pub start_x: f32,
}

impl Projectile {
    pub fn launch(id: u32, pos: Vec2, vel: Vec2, time: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: vel.y.atan2(vel.x),
            active: true,
            launched_at: time,
            start_x: pos.x,
        }
    }

    /// Flight progress toward the wall in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.start_x <= 0.0 {
            return 1.0;
        }
        (1.0 - self.pos.x / self.start_x).clamp(0.0, 1.0)
    }
}

/// Remaining throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBudget {
    pub left: u32,
}

impl PlatformBudget {
    /// Grant platforms without exceeding `cap`; returns how many were added.
    /// A budget already above the cap is left alone.
    pub fn add(&mut self, amount: u32, cap: u32) -> u32 {
        let before = self.left;
        self.left = self.left.max(self.left.saturating_add(amount).min(cap));
        self.left - before
    }

    /// Spend one platform if any remain
    pub fn take(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        true
    }
}

/// Outbound notifications, drained by the UI once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Remaining-throws indicator needs a redraw
    BudgetChanged { left: u32 },
    /// Score text needs a redraw
    ScoreChanged { score: f32 },
    /// Show the game-over panel
    RunEnded { score: f32, max_altitude: f32 },
    RunReset,
    /// First-move prompt should disappear
    PromptHidden,
    HeroBounced { apex: f32 },
    ProjectileThrown { id: u32 },
    ProjectileConsumed { id: u32, feature: &'static str },
    /// Left the tracked window without sticking
    ProjectileLost { id: u32 },
    PlatformPlaced { id: u32, y: f32 },
    HumanJumped { from: f32, to: f32 },
    HumanLanded { y: f32 },
    HumanWorried,
    HumanCalmed,
}

impl GameEvent {
    /// Events that only describe the latest value of something. A newer one
    /// supersedes any still-queued older one of the same kind.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            GameEvent::BudgetChanged { .. }
                | GameEvent::ScoreChanged { .. }
                | GameEvent::HeroBounced { .. }
        )
    }
}

/// Queue an event, collapsing status updates so an undrained queue only
/// grows with discrete gameplay events
pub fn queue_event(events: &mut Vec<GameEvent>, event: GameEvent) {
    if event.is_status() {
        let kind = std::mem::discriminant(&event);
        if let Some(slot) = events
            .iter_mut()
            .rev()
            .find(|e| std::mem::discriminant(&**e) == kind)
        {
            *slot = event;
            return;
        }
    }
    events.push(event);
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: RunMode,
    /// Run clock (seconds)
    pub time: f64,
    pub hero: Hero,
    pub human: Human,
    /// Platforms in placement order
    pub platforms: Vec<Platform>,
    /// Live projectiles in launch order
    pub projectiles: Vec<Projectile>,
    pub camera_y: f32,
    pub budget: PlatformBudget,
    /// Running maximum of the human's height
    pub score: f32,
    /// Highest point the hero has reached
    pub max_altitude: f32,
    pub last_throw: Option<f64>,
    pub prompt_visible: bool,
    pub prompt_remaining: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run state for the given config
    pub fn new(config: &Config) -> Self {
        Self {
            mode: RunMode::Playing,
            time: 0.0,
            hero: Hero::new(config),
            human: Human::default(),
            platforms: Vec::new(),
            projectiles: Vec::new(),
            camera_y: 0.0,
            budget: PlatformBudget {
                left: config.platforms.initial,
            },
            score: 0.0,
            max_altitude: config.physics.ground_y,
            last_throw: None,
            prompt_visible: true,
            prompt_remaining: config.ui.prompt_duration,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Projectiles still being simulated
    pub fn in_flight(&self) -> usize {
        self.projectiles.iter().filter(|p| p.active).count()
    }
}
