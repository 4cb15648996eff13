//! Game state and phase transitions
//!
//! `GameState` exclusively owns every entity collection, the score and
//! difficulty scalars, and the single seeded RNG all random draws go through.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::difficulty::{Difficulty, Score};
use super::entities::{Enemy, Obstacle, Player, Projectile, WorldEntity, release_all};
use super::events::{DestroyCause, EntityKind, GameEvent};
use super::spawner::Spawner;
use crate::tuning::{EnemyMode, Playfield, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Run in progress
    Playing,
    /// Player died; waiting for restart
    GameOver,
}

/// Variant detail a renderer needs to pick art
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Variant {
    None,
    Enemy(EnemyMode),
    /// Obstacle catalog index
    Obstacle(usize),
}

/// Read-only view of one active entity
#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub variant: Variant,
    pub pos: Vec2,
    pub bounds: Bounds,
    pub airborne: bool,
}

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u64,
    pub speed: f32,
    pub distance: f32,
    pub entities: Vec<EntitySnapshot>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Ticks simulated in the current run
    pub tick_count: u64,
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub score: Score,
    /// Score frozen at the moment of death
    pub final_score: Option<u64>,
    /// Pending events, drained by collaborators
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    last_displayed_score: u64,
    next_id: u32,
}

impl GameState {
    /// Create a game in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            playfield: tuning.playfield(),
            phase: GamePhase::Menu,
            tick_count: 0,
            player: None,
            enemies: Vec::new(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            spawner: Spawner::new(&tuning.spawn),
            difficulty: Difficulty::new(&tuning),
            score: Score::new(&tuning.scoring),
            final_score: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_displayed_score: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin the first run. Only valid from the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// Abandon the current run (or the game-over screen) and play again.
    ///
    /// Every entity is released before the new run begins.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            log::debug!("restart ignored in menu");
            return false;
        }
        self.clear_entities();
        self.begin_run();
        true
    }

    /// End the run. Re-entering while already over does nothing.
    pub fn game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let final_score = self.score.displayed();
        self.final_score = Some(final_score);
        log::info!(
            "Game over after {} ticks, final score {}",
            self.tick_count,
            final_score
        );
        self.events.push(GameEvent::PlayerDied { final_score });
        self.set_phase(GamePhase::GameOver);
        true
    }

    fn begin_run(&mut self) {
        self.score.reset();
        self.difficulty.reset();
        self.spawner.reset(&self.tuning.spawn);
        self.tick_count = 0;
        self.final_score = None;

        let player = Player::new(self.next_entity_id(), &self.tuning.player, &self.playfield);
        self.events.push(GameEvent::Spawned {
            id: player.id,
            kind: EntityKind::Player,
            pos: player.pos,
        });
        self.player = Some(player);

        self.last_displayed_score = 0;
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.set_phase(GamePhase::Playing);
    }

    /// Release the player and every pooled entity
    fn clear_entities(&mut self) {
        if let Some(player) = self.player.take() {
            self.events.push(GameEvent::Destroyed {
                id: player.id,
                kind: EntityKind::Player,
                pos: player.pos,
                cause: DestroyCause::Reset,
            });
        }
        release_all(&mut self.enemies, &mut self.events, DestroyCause::Reset);
        release_all(&mut self.obstacles, &mut self.events, DestroyCause::Reset);
        release_all(&mut self.projectiles, &mut self.events, DestroyCause::Reset);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        log::info!("Phase {:?} -> {:?} (seed {})", from, to, self.seed);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Emit a score event if the displayed value moved
    pub(crate) fn publish_score(&mut self) {
        let displayed = self.score.displayed();
        if displayed != self.last_displayed_score {
            self.last_displayed_score = displayed;
            self.events.push(GameEvent::ScoreChanged { score: displayed });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn displayed_score(&self) -> u64 {
        self.score.displayed()
    }

    /// Number of live enemies, obstacles and projectiles
    pub fn pooled_count(&self) -> usize {
        self.enemies.len() + self.obstacles.len() + self.projectiles.len()
    }

    /// Snapshot every active entity for rendering
    pub fn frame(&self) -> Frame {
        let mut entities = Vec::with_capacity(1 + self.pooled_count());

        if let Some(player) = &self.player {
            entities.push(EntitySnapshot {
                id: player.id,
                kind: EntityKind::Player,
                variant: Variant::None,
                pos: player.pos,
                bounds: player.bounds(),
                airborne: player.body.is_airborne(),
            });
        }
        entities.extend(self.enemies.iter().filter(|e| e.active).map(|e| EntitySnapshot {
            id: e.id,
            kind: EntityKind::Enemy,
            variant: Variant::Enemy(e.mode()),
            pos: e.pos,
            bounds: e.bounds(),
            airborne: e.is_airborne(),
        }));
        entities.extend(self.obstacles.iter().filter(|o| o.active).map(|o| EntitySnapshot {
            id: o.id,
            kind: EntityKind::Obstacle,
            variant: Variant::Obstacle(o.variant),
            pos: o.pos,
            bounds: o.bounds(),
            airborne: false,
        }));
        entities.extend(self.projectiles.iter().filter(|p| p.active).map(|p| EntitySnapshot {
            id: p.id,
            kind: EntityKind::Projectile,
            variant: Variant::None,
            pos: p.pos,
            bounds: p.bounds(),
            airborne: false,
        }));

        Frame {
            phase: self.phase,
            tick: self.tick_count,
            score: self.score.displayed(),
            speed: self.difficulty.speed(),
            distance: self.difficulty.distance(),
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.player.is_none());
        assert_eq!(state.pooled_count(), 0);
        assert!(state.frame().entities.is_empty());
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut state = GameState::new(1);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.is_some());
        assert!(!state.start());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Menu,
            to: GamePhase::Playing
        }));
        assert!(matches!(
            events[0],
            GameEvent::Spawned {
                kind: EntityKind::Player,
                ..
            }
        ));
    }

    #[test]
    fn test_restart_ignored_in_menu() {
        let mut state = GameState::new(1);
        assert!(!state.restart());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = GameState::new(1);
        assert!(!state.game_over());
        state.start();
        state.score.add_kill();
        state.drain_events();

        assert!(state.game_over());
        assert_eq!(state.final_score, Some(10));
        state.score.add_kill();
        assert!(!state.game_over());
        assert_eq!(state.final_score, Some(10));

        let died = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied { .. }))
            .count();
        assert_eq!(died, 1);
    }

    #[test]
    fn test_restart_releases_everything() {
        let mut state = GameState::new(1);
        state.start();
        let id = state.next_entity_id();
        let field = state.playfield;
        state
            .obstacles
            .push(Obstacle::spawn(id, 0, Vec2::new(30.0, 40.0), 5.0, &field));
        state.drain_events();

        assert!(state.restart());
        let events = state.drain_events();
        let released = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Destroyed {
                        cause: DestroyCause::Reset,
                        ..
                    }
                )
            })
            .count();
        // Old player + obstacle
        assert_eq!(released, 2);
        assert_eq!(state.pooled_count(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_frame_serializes() {
        let mut state = GameState::new(3);
        state.start();
        let json = serde_json::to_string(&state.frame()).unwrap();
        assert!(json.contains(r#""phase":"playing""#));
        assert!(json.contains(r#""kind":"player""#));
    }
}
