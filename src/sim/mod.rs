//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One explicit Euler step per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod events;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{BodyStep, KinematicBody};
pub use collision::{Bounds, intersects};
pub use difficulty::{Difficulty, Score};
pub use entities::{Enemy, EnemyMotion, Obstacle, Player, Projectile, WorldEntity};
pub use events::{AudioCue, DestroyCause, EntityKind, GameEvent};
pub use spawner::{SpawnPlan, Spawner};
pub use state::{EntitySnapshot, Frame, GamePhase, GameState, Variant};
pub use tick::{Command, TickReport, apply_command, tick};
