//! Simulated entities
//!
//! Entities own their kinematic state and never reference one another.
//! Scrolling entities bake in the scroll speed they were spawned with.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{BodyStep, KinematicBody};
use super::collision::Bounds;
use super::events::{DestroyCause, EntityKind, GameEvent};
use crate::tuning::{EnemyMode, EnemyTuning, Playfield, PlayerTuning, ProjectileTuning};

/// Common view over the pooled entity collections
pub trait WorldEntity {
    const KIND: EntityKind;

    fn id(&self) -> u32;
    fn pos(&self) -> Vec2;
    fn bounds(&self) -> Bounds;
    fn is_active(&self) -> bool;
}

/// Drop inactive entities, reporting each removal
pub fn purge_inactive<T: WorldEntity>(
    list: &mut Vec<T>,
    events: &mut Vec<GameEvent>,
    cause: DestroyCause,
) {
    list.retain(|entity| {
        if entity.is_active() {
            return true;
        }
        events.push(GameEvent::Destroyed {
            id: entity.id(),
            kind: T::KIND,
            pos: entity.pos(),
            cause,
        });
        false
    });
}

/// Remove everything, reporting each removal
pub fn release_all<T: WorldEntity>(
    list: &mut Vec<T>,
    events: &mut Vec<GameEvent>,
    cause: DestroyCause,
) {
    for entity in list.drain(..) {
        events.push(GameEvent::Destroyed {
            id: entity.id(),
            kind: T::KIND,
            pos: entity.pos(),
            cause,
        });
    }
}

macro_rules! world_entity {
    ($ty:ty, $kind:expr) => {
        impl WorldEntity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> u32 {
                self.id
            }

            fn pos(&self) -> Vec2 {
                self.pos
            }

            fn bounds(&self) -> Bounds {
                Bounds::centered(self.pos, self.size)
            }

            fn is_active(&self) -> bool {
                self.active
            }
        }
    };
}

world_entity!(Enemy, EntityKind::Enemy);
world_entity!(Obstacle, EntityKind::Obstacle);
world_entity!(Projectile, EntityKind::Projectile);

/// The player-controlled ninja
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub body: KinematicBody,
    /// Delta-time remaining before the next shot is allowed
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(id: u32, tuning: &PlayerTuning, field: &Playfield) -> Self {
        Self {
            id,
            pos: Vec2::new(tuning.x, field.ground_y),
            size: Vec2::new(tuning.width, tuning.height),
            body: KinematicBody::new(field.ground_y, tuning.gravity, tuning.jump_impulse),
            fire_cooldown: 0.0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, self.size)
    }

    pub fn jump(&mut self) -> bool {
        self.body.jump()
    }

    /// Integrate the body and count down the weapon
    pub fn update(&mut self, dt: f32) -> BodyStep {
        let step = self.body.integrate();
        self.pos.y = self.body.y;
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        }
        step
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Where a shuriken thrown right now would appear
    pub fn muzzle(&self, tuning: &ProjectileTuning) -> Vec2 {
        Vec2::new(self.pos.x + tuning.muzzle_offset, self.pos.y - tuning.muzzle_rise)
    }
}

/// Vertical behavior of an enemy, with the state each mode needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Fixed height
    Static,
    /// Own body plus a countdown (ticks) to the next hop
    Jumper {
        body: KinematicBody,
        jump_timer: f32,
    },
    /// Sine oscillation around `center_y`
    Bobber {
        center_y: f32,
        amplitude: f32,
        phase: f32,
        phase_rate: f32,
    },
}

impl EnemyMotion {
    pub fn mode(&self) -> EnemyMode {
        match self {
            EnemyMotion::Static => EnemyMode::Static,
            EnemyMotion::Jumper { .. } => EnemyMode::Jumper,
            EnemyMotion::Bobber { .. } => EnemyMode::Bobber,
        }
    }
}

/// Vertical edge events reported by an enemy update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    Steady,
    TookOff,
    Landed,
    /// Took off and landed within the same step (tiny hop)
    Hopped,
}

/// A scrolling foe; destroyed by shuriken, fatal on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub motion: EnemyMotion,
    pub active: bool,
}

impl Enemy {
    /// Spawn at the right edge. Jumpers draw their first hop delay from `rng`.
    pub fn spawn<R: Rng>(
        id: u32,
        mode: EnemyMode,
        speed: f32,
        tuning: &EnemyTuning,
        field: &Playfield,
        rng: &mut R,
    ) -> Self {
        let base_y = field.ground_y - tuning.base_offset;
        let (y, motion) = match mode {
            EnemyMode::Static => (base_y, EnemyMotion::Static),
            EnemyMode::Jumper => (
                base_y,
                EnemyMotion::Jumper {
                    body: KinematicBody::new(base_y, tuning.jumper_gravity, tuning.jumper_impulse),
                    jump_timer: tuning.first_jump.sample(rng),
                },
            ),
            EnemyMode::Bobber => {
                // Lowest point of the wave sits on the walking line
                let center_y = base_y - tuning.bob_amplitude;
                (
                    center_y,
                    EnemyMotion::Bobber {
                        center_y,
                        amplitude: tuning.bob_amplitude,
                        phase: 0.0,
                        phase_rate: tuning.bob_phase_rate,
                    },
                )
            }
        };

        Self {
            id,
            pos: Vec2::new(field.spawn_x, y),
            size: Vec2::new(tuning.width, tuning.height),
            speed,
            motion,
            active: true,
        }
    }

    pub fn mode(&self) -> EnemyMode {
        self.motion.mode()
    }

    pub fn is_airborne(&self) -> bool {
        matches!(&self.motion, EnemyMotion::Jumper { body, .. } if body.is_airborne())
    }

    /// Scroll left, run the vertical behavior, deactivate past the left edge
    pub fn update<R: Rng>(
        &mut self,
        tuning: &EnemyTuning,
        field: &Playfield,
        rng: &mut R,
    ) -> EnemyStep {
        if !self.active {
            return EnemyStep::Steady;
        }

        self.pos.x -= self.speed;

        let mut step = EnemyStep::Steady;
        match &mut self.motion {
            EnemyMotion::Static => {}
            EnemyMotion::Jumper { body, jump_timer } => {
                *jump_timer -= 1.0;
                if !body.is_airborne() && *jump_timer <= 0.0 && body.jump() {
                    *jump_timer = tuning.repeat_jump.sample(rng);
                    step = EnemyStep::TookOff;
                }
                if body.integrate() == BodyStep::Landed {
                    step = match step {
                        EnemyStep::TookOff => EnemyStep::Hopped,
                        _ => EnemyStep::Landed,
                    };
                }
                self.pos.y = body.y;
            }
            EnemyMotion::Bobber {
                center_y,
                amplitude,
                phase,
                phase_rate,
            } => {
                *phase += *phase_rate;
                self.pos.y = *center_y + *amplitude * phase.sin();
            }
        }

        if self.pos.x < field.left_cull_x {
            self.active = false;
        }

        step
    }
}

/// A static hazard; only jumping clears it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Index into the obstacle catalog
    pub variant: usize,
    pub active: bool,
}

impl Obstacle {
    pub fn spawn(id: u32, variant: usize, size: Vec2, speed: f32, field: &Playfield) -> Self {
        Self {
            id,
            pos: Vec2::new(field.spawn_x, field.ground_y),
            size,
            speed,
            variant,
            active: true,
        }
    }

    pub fn update(&mut self, field: &Playfield) {
        if !self.active {
            return;
        }
        self.pos.x -= self.speed;
        if self.pos.x < field.left_cull_x {
            self.active = false;
        }
    }
}

/// A thrown shuriken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(tuning.size),
            speed: tuning.speed,
            active: true,
        }
    }

    pub fn update(&mut self, field: &Playfield) {
        if !self.active {
            return;
        }
        self.pos.x += self.speed;
        if self.pos.x > field.right_cull_x {
            self.active = false;
        }
    }
}
