//! Human auto-climb policy
//!
//! `Idle -> Jumping -> Idle` and `Idle -> Worry -> Idle`. Only an idle human
//! starts anything; a jump in flight can never be redirected.

use std::f32::consts::PI;

use super::state::{Human, HumanState, Jump, Platform};
use crate::config::HumanConfig;
use crate::{ease_in_out, lerp};

/// What happened when a platform landed on the wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Mid-jump or worried; nothing changes
    Ignored,
    /// A reachable platform started a jump this tick
    Jumped { from: f32, to: f32 },
    /// Nothing reachable; the human frets
    Worried,
}

/// Result of one policy update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HumanUpdate {
    Holding,
    Jumped { from: f32, to: f32 },
    Landed { y: f32 },
    Calmed,
}

/// Highest platform strictly above `human_y` and within `threshold` of it.
/// Equal heights resolve to the older (lower id) platform.
pub fn find_jump_target(human_y: f32, platforms: &[Platform], threshold: f32) -> Option<&Platform> {
    platforms
        .iter()
        .filter(|p| p.y > human_y && p.y - human_y <= threshold)
        .max_by(|a, b| a.y.total_cmp(&b.y).then_with(|| b.id.cmp(&a.id)))
}

/// Start a jump if idle and something is in reach
pub fn attempt_jump(human: &mut Human, platforms: &[Platform], config: &HumanConfig) -> bool {
    if !human.is_idle() {
        return false;
    }
    let Some(target) = find_jump_target(human.y, platforms, config.jump_threshold) else {
        return false;
    };

    log::debug!("Human jumping {:.2} -> {:.2}", human.y, target.y);
    human.state = HumanState::Jumping(Jump {
        platform_id: target.id,
        start: human.y,
        target: target.y,
        elapsed: 0.0,
    });
    true
}

/// React to a freshly stuck platform. `platforms` already contains it.
pub fn on_platform_placed(
    human: &mut Human,
    platforms: &[Platform],
    config: &HumanConfig,
) -> Placement {
    match human.state {
        HumanState::Jumping(_) | HumanState::Worry { .. } => Placement::Ignored,
        HumanState::Idle => {
            let from = human.y;
            if attempt_jump(human, platforms, config) {
                let to = match human.state {
                    HumanState::Jumping(jump) => jump.target,
                    _ => from,
                };
                Placement::Jumped { from, to }
            } else {
                human.state = HumanState::Worry {
                    remaining: config.worry_duration,
                };
                Placement::Worried
            }
        }
    }
}

/// Height along a jump and whether it is finished.
///
/// The arc is a sine bump layered on an eased climb, not a ballistic path.
pub fn jump_height(jump: &Jump, config: &HumanConfig) -> (f32, bool) {
    let motion = jump.elapsed - config.jump_prep;
    if motion < 0.0 {
        return (jump.start, false);
    }

    let t = if config.jump_duration > 0.0 {
        (motion / config.jump_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    if t >= 1.0 {
        return (jump.target, true);
    }

    let y = lerp(jump.start, jump.target, ease_in_out(t)) + (t * PI).sin() * config.jump_arc;
    (y, false)
}

/// Advance the human by one tick
pub fn update_human(
    human: &mut Human,
    platforms: &[Platform],
    config: &HumanConfig,
    dt: f32,
) -> HumanUpdate {
    match &mut human.state {
        HumanState::Idle => {
            let from = human.y;
            if attempt_jump(human, platforms, config) {
                let to = match human.state {
                    HumanState::Jumping(jump) => jump.target,
                    _ => from,
                };
                HumanUpdate::Jumped { from, to }
            } else {
                HumanUpdate::Holding
            }
        }
        HumanState::Jumping(jump) => {
            jump.elapsed += dt;
            let (y, done) = jump_height(jump, config);
            human.y = y;
            if done {
                human.state = HumanState::Idle;
                HumanUpdate::Landed { y }
            } else {
                HumanUpdate::Holding
            }
        }
        HumanState::Worry { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                human.state = HumanState::Idle;
                HumanUpdate::Calmed
            } else {
                HumanUpdate::Holding
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::HumanStateKind;

    fn platforms(heights: &[f32]) -> Vec<Platform> {
        heights
            .iter()
            .enumerate()
            .map(|(i, &y)| Platform {
                id: i as u32 + 1,
                y,
                created_at: 0.0,
            })
            .collect()
    }

    fn config() -> HumanConfig {
        HumanConfig {
            jump_threshold: 2.0,
            jump_duration: 0.5,
            jump_arc: 0.4,
            jump_prep: 0.1,
            worry_duration: 1.0,
        }
    }

    #[test]
    fn test_target_is_highest_within_threshold() {
        let set = platforms(&[2.0, 3.5, 5.0]);
        let target = find_jump_target(1.0, &set, 2.0).unwrap();
        assert_eq!(target.y, 2.0);
    }

    #[test]
    fn test_target_prefers_furthest_reachable() {
        let set = platforms(&[1.5, 2.9, 2.2, 4.0]);
        assert_eq!(find_jump_target(1.0, &set, 2.0).unwrap().y, 2.9);
    }

    #[test]
    fn test_target_threshold_is_inclusive() {
        let set = platforms(&[3.0]);
        assert!(find_jump_target(1.0, &set, 2.0).is_some());
    }

    #[test]
    fn test_target_ignores_same_height_and_below() {
        let set = platforms(&[0.5, 1.0]);
        assert!(find_jump_target(1.0, &set, 2.0).is_none());
    }

    #[test]
    fn test_target_tie_breaks_on_lower_id() {
        let set = platforms(&[2.0, 2.0]);
        assert_eq!(find_jump_target(1.0, &set, 2.0).unwrap().id, 1);
    }

    #[test]
    fn test_placement_reachable_jumps_immediately() {
        let mut human = Human::default();
        let set = platforms(&[1.5]);
        let outcome = on_platform_placed(&mut human, &set, &config());
        assert_eq!(outcome, Placement::Jumped { from: 0.0, to: 1.5 });
        assert!(human.is_jumping());
    }

    #[test]
    fn test_placement_unreachable_worries() {
        let mut human = Human::default();
        let set = platforms(&[4.0]);
        assert_eq!(on_platform_placed(&mut human, &set, &config()), Placement::Worried);
        assert_eq!(human.kind(), HumanStateKind::Worry);
    }

    #[test]
    fn test_placement_during_jump_is_ignored() {
        let mut human = Human::default();
        let mut set = platforms(&[1.0]);
        assert!(attempt_jump(&mut human, &set, &config()));
        let before = human.state;

        set.push(Platform {
            id: 9,
            y: 1.8,
            created_at: 0.0,
        });
        assert_eq!(on_platform_placed(&mut human, &set, &config()), Placement::Ignored);
        assert_eq!(human.state, before);
    }

    #[test]
    fn test_worry_never_jumps_directly() {
        let mut human = Human::default();
        let cfg = config();
        let mut set = platforms(&[5.0]);
        on_platform_placed(&mut human, &set, &cfg);
        set.push(Platform {
            id: 7,
            y: 1.0,
            created_at: 0.0,
        });

        // Still worried while the timer runs, even with a reachable platform
        assert_eq!(update_human(&mut human, &set, &cfg, 0.5), HumanUpdate::Holding);
        assert!(human.is_worried());
        assert_eq!(update_human(&mut human, &set, &cfg, 0.6), HumanUpdate::Calmed);
        assert!(human.is_idle());
        assert_eq!(
            update_human(&mut human, &set, &cfg, 0.01),
            HumanUpdate::Jumped { from: 0.0, to: 1.0 }
        );
    }

    #[test]
    fn test_jump_holds_during_prep() {
        let jump = Jump {
            platform_id: 1,
            start: 1.0,
            target: 2.0,
            elapsed: 0.05,
        };
        assert_eq!(jump_height(&jump, &config()), (1.0, false));
    }

    #[test]
    fn test_jump_arc_lifts_midpoint() {
        let cfg = config();
        let jump = Jump {
            platform_id: 1,
            start: 1.0,
            target: 2.0,
            elapsed: cfg.jump_prep + cfg.jump_duration / 2.0,
        };
        let (y, done) = jump_height(&jump, &cfg);
        assert!(!done);
        assert!((y - (1.5 + cfg.jump_arc)).abs() < 1e-4);
    }

    #[test]
    fn test_jump_snaps_to_target() {
        let cfg = config();
        let mut human = Human::default();
        let set = platforms(&[1.7]);
        attempt_jump(&mut human, &set, &cfg);

        let mut landed = None;
        for _ in 0..100 {
            if let HumanUpdate::Landed { y } = update_human(&mut human, &set, &cfg, 0.02) {
                landed = Some(y);
                break;
            }
        }
        assert_eq!(landed, Some(1.7));
        assert_eq!(human.y, 1.7);
        assert!(human.is_idle());
    }

    #[test]
    fn test_zero_duration_jump_completes() {
        let cfg = HumanConfig {
            jump_duration: 0.0,
            jump_prep: 0.0,
            ..config()
        };
        let mut human = Human::default();
        let set = platforms(&[1.0]);
        attempt_jump(&mut human, &set, &cfg);
        assert_eq!(
            update_human(&mut human, &set, &cfg, 0.016),
            HumanUpdate::Landed { y: 1.0 }
        );
    }
}
