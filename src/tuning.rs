//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a run can be replayed
//! from (seed, tuning, inputs). Loaded from JSON; missing fields fall back to
//! the values in [`crate::consts`].

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Half-open interval `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub min: f32,
    pub max: f32,
}

impl Window {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a value from the window
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }

    fn check(&self, name: &str) -> Result<(), TuningError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min >= self.max
        {
            return Err(TuningError::Invalid(format!(
                "{name} must be a non-empty range [min, max) with min >= 0, got [{}, {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Vertical behavior an enemy is spawned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyMode {
    /// Walks along the ground, no vertical motion
    Static,
    /// Hops at random intervals under its own gravity
    Jumper,
    /// Floats up and down on a sine wave
    Bobber,
}

/// One entry of the obstacle catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleVariant {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl ObstacleVariant {
    pub fn new(name: &str, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            gravity: PLAYER_GRAVITY,
            jump_impulse: PLAYER_JUMP_IMPULSE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    /// Height of the enemy center above the ground line
    pub base_offset: f32,
    /// Behavior modes the spawner picks from (uniformly)
    pub modes: Vec<EnemyMode>,
    pub jumper_gravity: f32,
    pub jumper_impulse: f32,
    /// Ticks before a jumper's first hop
    pub first_jump: Window,
    /// Ticks between subsequent hops
    pub repeat_jump: Window,
    pub bob_amplitude: f32,
    pub bob_phase_rate: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            base_offset: ENEMY_BASE_OFFSET,
            modes: vec![EnemyMode::Static, EnemyMode::Jumper, EnemyMode::Bobber],
            jumper_gravity: JUMPER_GRAVITY,
            jumper_impulse: JUMPER_JUMP_IMPULSE,
            first_jump: Window::new(90.0, 210.0),
            repeat_jump: Window::new(150.0, 270.0),
            bob_amplitude: BOBBER_AMPLITUDE,
            bob_phase_rate: BOBBER_PHASE_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub catalog: Vec<ObstacleVariant>,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            catalog: vec![
                ObstacleVariant::new("spike", 30.0, 40.0),
                ObstacleVariant::new("rock", 50.0, 30.0),
                ObstacleVariant::new("log", 60.0, 25.0),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: f32,
    pub speed: f32,
    pub muzzle_offset: f32,
    /// How far above the player center shuriken are released
    pub muzzle_rise: f32,
    /// Delta-time units between shots (0 = unlimited)
    pub fire_cooldown: f32,
    /// Fire automatically whenever the cooldown allows
    pub auto_fire: bool,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: PROJECTILE_SIZE,
            speed: PROJECTILE_SPEED,
            muzzle_offset: MUZZLE_OFFSET,
            muzzle_rise: MUZZLE_RISE,
            fire_cooldown: 0.0,
            auto_fire: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub initial_enemy_delay: f32,
    pub initial_obstacle_delay: f32,
    pub enemy_interval: Window,
    pub obstacle_interval: Window,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_enemy_delay: INITIAL_ENEMY_DELAY,
            initial_obstacle_delay: INITIAL_OBSTACLE_DELAY,
            enemy_interval: Window::new(90.0, 150.0),
            obstacle_interval: Window::new(120.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub survival_increment: f64,
    pub kill_bonus: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            survival_increment: SURVIVAL_INCREMENT,
            kill_bonus: KILL_BONUS,
        }
    }
}

/// Complete balance sheet for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_offset: f32,
    pub base_scroll_speed: f32,
    pub scroll_ramp: f32,
    pub cull_margin: f32,
    pub spawn_margin: f32,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub obstacle: ObstacleTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
    pub scoring: ScoringTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_offset: GROUND_OFFSET,
            base_scroll_speed: BASE_SCROLL_SPEED,
            scroll_ramp: SCROLL_RAMP,
            cull_margin: CULL_MARGIN,
            spawn_margin: SPAWN_MARGIN,
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            obstacle: ObstacleTuning::default(),
            projectile: ProjectileTuning::default(),
            spawn: SpawnTuning::default(),
            scoring: ScoringTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject balance sheets the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("base_scroll_speed", self.base_scroll_speed),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.gravity", self.player.gravity),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("enemy.jumper_gravity", self.enemy.jumper_gravity),
            ("projectile.size", self.projectile.size),
            ("projectile.speed", self.projectile.speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let finite = [
            ("ground_offset", self.ground_offset),
            ("scroll_ramp", self.scroll_ramp),
            ("cull_margin", self.cull_margin),
            ("spawn_margin", self.spawn_margin),
            ("player.x", self.player.x),
            ("enemy.base_offset", self.enemy.base_offset),
            ("enemy.bob_amplitude", self.enemy.bob_amplitude),
            ("enemy.bob_phase_rate", self.enemy.bob_phase_rate),
            ("projectile.muzzle_offset", self.projectile.muzzle_offset),
            ("projectile.muzzle_rise", self.projectile.muzzle_rise),
            ("projectile.fire_cooldown", self.projectile.fire_cooldown),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be finite")));
            }
        }

        if self.scroll_ramp < 0.0 {
            return Err(TuningError::Invalid(
                "scroll_ramp must not be negative (difficulty never decreases)".into(),
            ));
        }
        if self.player.jump_impulse >= 0.0 || self.enemy.jumper_impulse >= 0.0 {
            return Err(TuningError::Invalid(
                "jump impulses must be negative (y grows downward)".into(),
            ));
        }
        if self.projectile.auto_fire && self.projectile.fire_cooldown <= 0.0 {
            return Err(TuningError::Invalid(
                "auto_fire needs a positive fire_cooldown".into(),
            ));
        }
        if !self.scoring.survival_increment.is_finite()
            || !self.scoring.kill_bonus.is_finite()
            || self.scoring.survival_increment < 0.0
            || self.scoring.kill_bonus < 0.0
        {
            return Err(TuningError::Invalid(
                "score increments must be finite and non-negative".into(),
            ));
        }

        self.enemy.first_jump.check("enemy.first_jump")?;
        self.enemy.repeat_jump.check("enemy.repeat_jump")?;
        self.spawn.enemy_interval.check("spawn.enemy_interval")?;
        self.spawn.obstacle_interval.check("spawn.obstacle_interval")?;

        if self.enemy.modes.is_empty() {
            return Err(TuningError::Invalid("enemy.modes must not be empty".into()));
        }
        if self.obstacle.catalog.is_empty() {
            return Err(TuningError::Invalid(
                "obstacle.catalog must not be empty".into(),
            ));
        }
        for variant in &self.obstacle.catalog {
            let sized = |v: f32| v.is_finite() && v > 0.0;
            if !(sized(variant.width) && sized(variant.height)) {
                return Err(TuningError::Invalid(format!(
                    "obstacle '{}' must have a positive size",
                    variant.name
                )));
            }
        }

        Ok(())
    }

    /// Screen-space geometry derived from this tuning
    pub fn playfield(&self) -> Playfield {
        Playfield {
            ground_y: self.screen_height - self.ground_offset,
            spawn_x: self.screen_width + self.spawn_margin,
            left_cull_x: -self.cull_margin,
            right_cull_x: self.screen_width + self.cull_margin,
        }
    }
}

/// Screen-space landmarks (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Playfield {
    /// Resting y of the player center
    pub ground_y: f32,
    /// x where scrolling entities enter
    pub spawn_x: f32,
    /// Scrolling entities are culled once x drops below this
    pub left_cull_x: f32,
    /// Projectiles are culled once x exceeds this
    pub right_cull_x: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{ "base_scroll_speed": 7.5, "enemy": { "modes": ["jumper"] } }"#;
        let tuning = Tuning::from_json(json).expect("valid tuning");
        assert_eq!(tuning.base_scroll_speed, 7.5);
        assert_eq!(tuning.enemy.modes, vec![EnemyMode::Jumper]);
        // Untouched sections keep defaults
        assert_eq!(tuning.enemy.width, ENEMY_WIDTH);
        assert_eq!(tuning.obstacle.catalog.len(), 3);
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = Tuning::from_json(r#"{ "obstacle": { "catalog": [] } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_inverted_window() {
        let err = Tuning::from_json(
            r#"{ "spawn": { "enemy_interval": { "min": 150.0, "max": 90.0 } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("spawn.enemy_interval"));
    }

    #[test]
    fn test_rejects_auto_fire_without_cooldown() {
        let err = Tuning::from_json(r#"{ "projectile": { "auto_fire": true } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unbounded_obstacle() {
        let mut tuning = Tuning::default();
        tuning.obstacle.catalog[1].width = f32::INFINITY;
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("rock"));
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_window_sample_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let window = Window::new(90.0, 150.0);
        for _ in 0..1000 {
            let v = window.sample(&mut rng);
            assert!((90.0..150.0).contains(&v));
        }
    }

    #[test]
    fn test_playfield() {
        let field = Tuning::default().playfield();
        assert_eq!(field.ground_y, 570.0);
        assert_eq!(field.spawn_x, 1330.0);
        assert_eq!(field.left_cull_x, -100.0);
        assert_eq!(field.right_cull_x, 1380.0);
    }
}
