//! Ninja Run - A side-scrolling runner where a ninja jumps spikes and throws shuriken
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, game state)
//! - `platform`: Collaborator contract (render/audio/UI sinks, command routing)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Reference playfield size in pixels
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Ground sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 150.0;

    /// Player defaults - fixed screen column, only moves vertically
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    pub const PLAYER_JUMP_IMPULSE: f32 = -15.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 45.0;
    pub const ENEMY_HEIGHT: f32 = 45.0;
    /// Enemies stand this far above the ground line
    pub const ENEMY_BASE_OFFSET: f32 = 45.0;
    pub const JUMPER_GRAVITY: f32 = 0.2;
    pub const JUMPER_JUMP_IMPULSE: f32 = -12.0;
    pub const BOBBER_AMPLITUDE: f32 = 40.0;
    /// Radians added to the bob phase every tick
    pub const BOBBER_PHASE_RATE: f32 = 0.05;

    /// Shuriken defaults
    pub const PROJECTILE_SIZE: f32 = 20.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;
    /// Shuriken leave the hand this far ahead of the player center
    pub const MUZZLE_OFFSET: f32 = 30.0;
    /// ...and this far above it (shoulder height, level with walking enemies)
    pub const MUZZLE_RISE: f32 = 25.0;

    /// Scroll speed (pixels per tick) at the start of a run
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    /// Scroll speed gained every tick while playing
    pub const SCROLL_RAMP: f32 = 0.0001;

    /// Spawn timers (ticks at 60 Hz normalized delta)
    pub const INITIAL_ENEMY_DELAY: f32 = 150.0;
    pub const INITIAL_OBSTACLE_DELAY: f32 = 200.0;

    /// Entities are culled once this far past the screen edge
    pub const CULL_MARGIN: f32 = 100.0;
    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Score per tick survived
    pub const SURVIVAL_INCREMENT: f64 = 0.1;
    /// Score per enemy destroyed
    pub const KILL_BONUS: f64 = 10.0;

    /// Tint attached to enemy destroy effects (orange burst)
    pub const DESTROY_EFFECT_TINT: u32 = 0xff8800;
}
