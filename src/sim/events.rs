//! Discrete events emitted by the simulation
//!
//! Collaborators (renderer, audio, HUD) react to these instead of polling.
//! Events accumulate on [`super::GameState`] until drained.

use glam::Vec2;
use serde::Serialize;

use super::state::GamePhase;

/// Entity category, as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
    Obstacle,
    Projectile,
}

/// Why an entity left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestroyCause {
    /// Scrolled past a screen edge
    Offscreen,
    /// Shuriken met enemy
    Hit,
    /// Run was restarted
    Reset,
}

/// Something observable happened during a command or tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    Spawned { id: u32, kind: EntityKind, pos: Vec2 },
    Destroyed { id: u32, kind: EntityKind, pos: Vec2, cause: DestroyCause },
    Jumped,
    PlayerLanded,
    ProjectileFired { id: u32 },
    /// Destroy effect at the enemy's last position
    EnemyDestroyed { id: u32, pos: Vec2, tint: u32 },
    EnemyAirborne { id: u32 },
    EnemyLanded { id: u32 },
    /// Displayed (integer) score changed
    ScoreChanged { score: u64 },
    PlayerDied { final_score: u64 },
}

/// Sound the audio collaborator should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Jumped,
    ProjectileFired,
    EnemyDestroyed,
    PlayerDied,
}

impl GameEvent {
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::Jumped => Some(AudioCue::Jumped),
            GameEvent::ProjectileFired { .. } => Some(AudioCue::ProjectileFired),
            GameEvent::EnemyDestroyed { .. } => Some(AudioCue::EnemyDestroyed),
            GameEvent::PlayerDied { .. } => Some(AudioCue::PlayerDied),
            _ => None,
        }
    }

    /// Events a renderer turns into effects or sprite swaps
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            GameEvent::Spawned { .. }
                | GameEvent::Destroyed { .. }
                | GameEvent::EnemyDestroyed { .. }
                | GameEvent::EnemyAirborne { .. }
                | GameEvent::EnemyLanded { .. }
                | GameEvent::Jumped
                | GameEvent::PlayerLanded
        )
    }
}
