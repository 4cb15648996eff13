//! Vertical kinematics shared by the player and jumping enemies
//!
//! Explicit Euler, one step per tick, no sub-stepping. The ground is a
//! horizontal line; y grows downward so jumps use a negative impulse.

use serde::{Deserialize, Serialize};

/// Outcome of a single integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStep {
    /// Resting on the ground, nothing moved
    Grounded,
    /// Still in the air after this step
    Airborne,
    /// Touched down this step (edge event)
    Landed,
}

/// A body that can jump and fall back onto a fixed ground line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    pub y: f32,
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub ground_y: f32,
    airborne: bool,
}

impl KinematicBody {
    /// Create a body at rest on `ground_y`
    pub fn new(ground_y: f32, gravity: f32, jump_impulse: f32) -> Self {
        Self {
            y: ground_y,
            vel_y: 0.0,
            gravity,
            jump_impulse,
            ground_y,
            airborne: false,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    /// Start a jump. Returns false (and does nothing) while already airborne.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.vel_y = self.jump_impulse;
        self.airborne = true;
        true
    }

    /// Advance one tick
    pub fn integrate(&mut self) -> BodyStep {
        if !self.airborne {
            return BodyStep::Grounded;
        }

        self.vel_y += self.gravity;
        self.y += self.vel_y;

        if self.y >= self.ground_y {
            self.y = self.ground_y;
            self.vel_y = 0.0;
            self.airborne = false;
            return BodyStep::Landed;
        }

        BodyStep::Airborne
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut body = KinematicBody::new(500.0, PLAYER_GRAVITY, PLAYER_JUMP_IMPULSE);
        assert!(body.jump());
        body.integrate();
        let vel = body.vel_y;
        assert!(!body.jump());
        assert_eq!(body.vel_y, vel);
    }

    #[test]
    fn test_grounded_body_stays_put() {
        let mut body = KinematicBody::new(500.0, PLAYER_GRAVITY, PLAYER_JUMP_IMPULSE);
        for _ in 0..10 {
            assert_eq!(body.integrate(), BodyStep::Grounded);
        }
        assert_eq!(body.y, 500.0);
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_player_jump_lands_exactly() {
        let mut body = KinematicBody::new(570.0, PLAYER_GRAVITY, PLAYER_JUMP_IMPULSE);
        body.jump();

        let mut landed_at = None;
        for t in 1..=100 {
            match body.integrate() {
                BodyStep::Landed => {
                    landed_at = Some(t);
                    break;
                }
                BodyStep::Airborne => assert!(body.y < body.ground_y),
                BodyStep::Grounded => panic!("grounded before landing"),
            }
        }

        // 15 / 0.8 ~ 19 ticks up, same down
        let t = landed_at.expect("body never landed");
        assert!((36..=40).contains(&t), "landed after {t} ticks");
        assert_eq!(body.y, 570.0);
        assert_eq!(body.vel_y, 0.0);
        assert!(!body.is_airborne());
    }

    #[test]
    fn test_landed_is_an_edge() {
        let mut body = KinematicBody::new(0.0, 1.0, -2.0);
        body.jump();
        let steps: Vec<_> = (0..6).map(|_| body.integrate()).collect();
        assert_eq!(
            steps,
            vec![
                BodyStep::Airborne, // v=-1, y=-1
                BodyStep::Airborne, // v=0, y=-1
                BodyStep::Landed,   // v=1, y=0
                BodyStep::Grounded,
                BodyStep::Grounded,
                BodyStep::Grounded,
            ]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn jump_always_returns_to_ground(
                ground in 100.0f32..1000.0,
                gravity in 0.05f32..2.0,
                impulse in -30.0f32..-0.5,
            ) {
                let mut body = KinematicBody::new(ground, gravity, impulse);
                prop_assert!(body.jump());

                // Generous bound: 2 * |impulse| / gravity + slack
                let bound = (2.0 * -impulse / gravity).ceil() as usize + 4;
                let mut landed = false;
                for _ in 0..bound {
                    if body.integrate() == BodyStep::Landed {
                        landed = true;
                        break;
                    }
                }

                prop_assert!(landed, "no landing within {} ticks", bound);
                prop_assert_eq!(body.y, ground);
                prop_assert_eq!(body.vel_y, 0.0);
            }
        }
    }
}
