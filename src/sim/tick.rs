//! Run controller
//!
//! Owns one run's entities and advances them in a fixed order. Each tick:
//! clock -> hero -> projectiles (features, wall, range) -> human -> camera ->
//! feature timers -> altitude -> score -> end-of-run check.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bonus_target::BonusTarget;
use super::feature::{Feature, FeatureContext, FeatureVisual};
use super::human::{self, HumanUpdate, Placement};
use super::physics;
use super::state::{GameEvent, GameState, Platform, Projectile, RunMode, queue_event};
use crate::config::{Config, ConfigError, ConfigValue};
use crate::consts::{MAX_FRAME_DT, TIME_EPSILON};
use crate::highscores::HighScores;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Throw a platform (click/tap/space)
    pub throw: bool,
    /// Start a fresh run
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the game throws for itself
    pub autoplay: bool,
}

/// One run of the game: entities, features, RNG and pending UI events
pub struct Run {
    config: Config,
    state: GameState,
    features: Vec<Box<dyn Feature>>,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Run {
    /// New run with the standard feature set (bonus target)
    pub fn new(config: Config, seed: u64) -> Self {
        let bonus = BonusTarget::new(&config);
        let mut run = Self::bare(config, seed);
        run.register_feature(Box::new(bonus));
        run
    }

    /// New run with no features registered
    pub fn bare(config: Config, seed: u64) -> Self {
        log::info!("Run started (seed {seed})");
        let state = GameState::new(&config);
        Self {
            config,
            state,
            features: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Append a feature; features are consulted in registration order
    pub fn register_feature(&mut self, mut feature: Box<dyn Feature>) {
        feature.on_reset(&self.config);
        log::debug!("Registered feature {}", feature.name());
        self.features.push(feature);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> RunMode {
        self.state.mode
    }

    pub fn is_over(&self) -> bool {
        self.state.mode == RunMode::GameOver
    }

    pub fn platforms_left(&self) -> u32 {
        self.state.budget.left
    }

    pub fn score(&self) -> f32 {
        self.state.score
    }

    /// Names of registered features, in order
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name()).collect()
    }

    /// What each enabled feature wants drawn this frame
    pub fn feature_visuals(&self) -> Vec<FeatureVisual> {
        self.features
            .iter()
            .filter(|f| f.enabled(&self.config))
            .filter_map(|f| f.visual())
            .collect()
    }

    /// Take all events queued since the last drain.
    ///
    /// Collaborators are expected to drain once per frame. Status events
    /// (budget, score, bounce) are collapsed to their latest value while
    /// queued; discrete events accumulate until drained.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Edit one tunable by dotted path. The snapshot is swapped wholesale so
    /// a tick never sees a half-applied edit.
    pub fn apply_setting(&mut self, key: &str, value: ConfigValue) -> Result<ConfigValue, ConfigError> {
        let mut next = self.config.clone();
        let stored = next.set(key, value)?;
        log::debug!("Setting {key} = {stored:?}");
        self.config = next;
        Ok(stored)
    }

    /// Throw a platform from the hero toward the wall.
    ///
    /// Refused (returns `false`) unless playing, budget remains and the
    /// cooldown since the previous throw has elapsed.
    pub fn throw_platform(&mut self) -> bool {
        if self.state.mode != RunMode::Playing || self.state.budget.left == 0 {
            return false;
        }
        if let Some(last) = self.state.last_throw {
            let cooldown = self.config.throw.cooldown as f64;
            if self.state.time - last + TIME_EPSILON < cooldown {
                return false;
            }
        }
        if !self.state.budget.take() {
            return false;
        }

        let throw = &self.config.throw;
        let (lo, hi) = if throw.arc_min <= throw.arc_max {
            (throw.arc_min, throw.arc_max)
        } else {
            (throw.arc_max, throw.arc_min)
        };
        let lift = if hi > lo {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        };
        let vel = Vec2::new(-throw.speed, lift);

        let id = self.state.next_entity_id();
        let projectile = Projectile::launch(id, self.state.hero.pos, vel, self.state.time);
        log::debug!(
            "Threw projectile {id} from ({:.2}, {:.2}), {} left",
            projectile.pos.x,
            projectile.pos.y,
            self.state.budget.left
        );
        self.state.projectiles.push(projectile);
        self.state.last_throw = Some(self.state.time);

        self.emit(GameEvent::ProjectileThrown { id });
        self.emit(GameEvent::BudgetChanged {
            left: self.state.budget.left,
        });
        self.hide_prompt();
        true
    }

    /// Grant extra platforms, capped at `platforms.max`. Returns how many were added.
    pub fn add_platforms(&mut self, amount: u32) -> u32 {
        let granted = self.state.budget.add(amount, self.config.platforms.max);
        self.emit(GameEvent::BudgetChanged {
            left: self.state.budget.left,
        });
        granted
    }

    fn emit(&mut self, event: GameEvent) {
        queue_event(&mut self.events, event);
    }

    /// Start over, keeping the RNG stream
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        for feature in &mut self.features {
            feature.on_reset(&self.config);
        }
        self.events.clear();
        self.emit(GameEvent::RunReset);
        self.emit(GameEvent::BudgetChanged {
            left: self.state.budget.left,
        });
        self.emit(GameEvent::ScoreChanged { score: 0.0 });
        log::info!("Run reset ({} platforms)", self.state.budget.left);
    }

    /// Start over with a fresh seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    pub fn pause(&mut self) {
        if self.state.mode == RunMode::Playing {
            self.state.mode = RunMode::Paused;
            log::debug!("Paused at t={:.2}", self.state.time);
        }
    }

    pub fn resume(&mut self) {
        if self.state.mode == RunMode::Paused {
            self.state.mode = RunMode::Playing;
            log::debug!("Resumed at t={:.2}", self.state.time);
        }
    }

    /// Hand the final score to the leaderboard. Returns the rank achieved.
    pub fn submit_score(&self, name: &str, timestamp: f64, scores: &mut HighScores) -> Option<usize> {
        let rank = scores.add_score(name, self.state.score, timestamp);
        match rank {
            Some(rank) => log::info!("Score {:.2} entered at rank {rank}", self.state.score),
            None => log::info!("Score {:.2} did not place", self.state.score),
        }
        rank
    }

    /// Advance by a wall-clock frame delta, clamped to [`MAX_FRAME_DT`]
    pub fn advance(&mut self, frame_dt: f32) {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.tick(dt);
    }

    /// Apply one tick's worth of input, then advance by `dt`
    pub fn step(&mut self, input: &TickInput, dt: f32) {
        if input.restart {
            self.reset();
        }
        if input.pause {
            match self.state.mode {
                RunMode::Playing => self.pause(),
                RunMode::Paused => self.resume(),
                RunMode::GameOver => {}
            }
        }
        if input.throw || (input.autoplay && autoplay_wants_throw(&self.state, &self.config)) {
            self.throw_platform();
        }
        self.advance(dt);
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.state.mode != RunMode::Playing {
            return;
        }

        self.state.time += dt as f64;
        self.update_prompt(dt);

        if let Some(apex) = physics::update_hero(
            &mut self.state.hero,
            self.state.human.y,
            &self.config,
            &mut self.rng,
            dt,
        ) {
            self.emit(GameEvent::HeroBounced { apex });
        }

        self.update_projectiles(dt);
        self.update_human(dt);

        self.state.camera_y =
            physics::update_camera(self.state.camera_y, self.state.hero.pos.y, &self.config.camera, dt);

        self.update_features(dt);

        self.state.max_altitude = self.state.max_altitude.max(self.state.hero.pos.y);
        if self.state.human.y > self.state.score {
            self.state.score = self.state.human.y;
            self.emit(GameEvent::ScoreChanged {
                score: self.state.score,
            });
        }

        self.check_run_end();
    }

    fn update_prompt(&mut self, dt: f32) {
        if !self.state.prompt_visible {
            return;
        }
        self.state.prompt_remaining -= dt;
        if self.state.prompt_remaining <= 0.0 {
            self.hide_prompt();
        }
    }

    fn hide_prompt(&mut self) {
        if self.state.prompt_visible {
            self.state.prompt_visible = false;
            self.state.prompt_remaining = 0.0;
            self.emit(GameEvent::PromptHidden);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        let mut projectiles = std::mem::take(&mut self.state.projectiles);

        for projectile in projectiles.iter_mut().filter(|p| p.active) {
            physics::integrate_projectile(projectile, &self.config.physics, dt);

            // Features first: a bonus hit pre-empts sticking to the wall
            if let Some(feature) = self.offer_to_features(projectile) {
                projectile.active = false;
                self.emit(GameEvent::ProjectileConsumed {
                    id: projectile.id,
                    feature,
                });
                continue;
            }

            if physics::reached_wall(projectile) {
                projectile.active = false;
                self.place_platform(projectile.pos.y.max(0.0));
                continue;
            }

            if physics::out_of_range(projectile, self.state.camera_y, &self.config) {
                projectile.active = false;
                log::debug!("Projectile {} lost at y={:.2}", projectile.id, projectile.pos.y);
                self.emit(GameEvent::ProjectileLost { id: projectile.id });
            }
        }

        projectiles.retain(|p| p.active);
        // Nothing spawns projectiles during this pass, but keep any that did
        projectiles.append(&mut self.state.projectiles);
        self.state.projectiles = projectiles;
    }

    /// Offer a projectile to each enabled feature in order. Returns the name
    /// of the feature that consumed it.
    fn offer_to_features(&mut self, projectile: &Projectile) -> Option<&'static str> {
        let mut ctx = FeatureContext::new(
            &self.config,
            self.state.human.y,
            self.state.camera_y,
            self.state.time,
            &mut self.rng,
            &mut self.state.budget,
            &mut self.events,
        );
        for feature in &mut self.features {
            if feature.enabled(ctx.config) && feature.on_projectile(projectile, &mut ctx) {
                return Some(feature.name());
            }
        }
        None
    }

    fn place_platform(&mut self, y: f32) {
        let id = self.state.next_entity_id();
        self.state.platforms.push(Platform {
            id,
            y,
            created_at: self.state.time,
        });
        log::debug!("Platform {id} stuck at y={y:.2}");
        self.emit(GameEvent::PlatformPlaced { id, y });

        match human::on_platform_placed(&mut self.state.human, &self.state.platforms, &self.config.human) {
            Placement::Jumped { from, to } => self.emit(GameEvent::HumanJumped { from, to }),
            Placement::Worried => self.emit(GameEvent::HumanWorried),
            Placement::Ignored => {}
        }
    }

    fn update_human(&mut self, dt: f32) {
        let update = human::update_human(
            &mut self.state.human,
            &self.state.platforms,
            &self.config.human,
            dt,
        );
        match update {
            HumanUpdate::Holding => {}
            HumanUpdate::Jumped { from, to } => self.emit(GameEvent::HumanJumped { from, to }),
            HumanUpdate::Landed { y } => self.emit(GameEvent::HumanLanded { y }),
            HumanUpdate::Calmed => self.emit(GameEvent::HumanCalmed),
        }
    }

    fn update_features(&mut self, dt: f32) {
        let mut ctx = FeatureContext::new(
            &self.config,
            self.state.human.y,
            self.state.camera_y,
            self.state.time,
            &mut self.rng,
            &mut self.state.budget,
            &mut self.events,
        );
        for feature in &mut self.features {
            if feature.enabled(ctx.config) {
                feature.update(dt, &mut ctx);
            }
        }
    }

    fn check_run_end(&mut self) {
        let finished = self.state.budget.left == 0
            && self.state.projectiles.is_empty()
            && self.state.human.is_idle();
        if !finished {
            return;
        }

        self.state.mode = RunMode::GameOver;
        log::info!(
            "Run over: score {:.2}, max altitude {:.2}, {} platforms placed",
            self.state.score,
            self.state.max_altitude,
            self.state.platforms.len()
        );
        self.emit(GameEvent::RunEnded {
            score: self.state.score,
            max_altitude: self.state.max_altitude,
        });
    }
}

/// Demo-mode throwing policy.
///
/// Throws when the human is settled, nothing is in flight and a projectile
/// released now would stick within the human's reach.
pub fn autoplay_wants_throw(state: &GameState, config: &Config) -> bool {
    if state.mode != RunMode::Playing || state.budget.left == 0 {
        return false;
    }
    if !state.human.is_idle() || state.in_flight() > 0 {
        return false;
    }

    // Flight time to the wall and drop along the way, using the mean lift
    let hero = &state.hero;
    let speed = config.throw.speed.max(0.1);
    let flight = hero.pos.x.max(0.0) / speed;
    let lift = (config.throw.arc_min + config.throw.arc_max) / 2.0;
    let gravity = config.physics.gravity * config.physics.projectile_gravity_scale;
    let landing = hero.pos.y + lift * flight - 0.5 * gravity * flight * flight;

    let gap = landing - state.human.y;
    gap > 0.25 && gap <= config.human.jump_threshold * 0.9
}
