//! Per-tick simulation pipeline and command handling
//!
//! One `tick` call runs the whole pipeline synchronously:
//! ramp -> player -> spawn -> integrate -> cull -> collide -> score.
//! A fatal collision freezes the frame right there.

use serde::{Deserialize, Serialize};

use super::body::BodyStep;
use super::entities::{
    Enemy, EnemyStep, Obstacle, Projectile, WorldEntity, purge_inactive,
};
use super::events::{DestroyCause, EntityKind, GameEvent};
use super::state::{GamePhase, GameState};
use crate::consts::DESTROY_EFFECT_TINT;
use crate::tuning::EnemyMode;

/// Discrete player/menu commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Jump,
    Fire,
    Start,
    Restart,
}

/// What a tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Displayed score after the tick
    pub score: u64,
    /// Enemies destroyed this tick
    pub kills: u32,
    /// The run ended during this tick
    pub game_over: bool,
}

impl TickReport {
    fn idle(state: &GameState) -> Self {
        Self {
            tick: state.tick_count,
            score: state.displayed_score(),
            kills: 0,
            game_over: false,
        }
    }
}

/// Apply a command; commands illegal in the current phase are ignored.
///
/// Returns whether the command had an effect.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    let accepted = match command {
        Command::Jump => jump(state),
        Command::Fire => fire(state),
        Command::Start => state.start(),
        Command::Restart => state.restart(),
    };
    if !accepted {
        log::debug!("Ignored {:?} in {:?}", command, state.phase);
    }
    accepted
}

fn jump(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let Some(player) = state.player.as_mut() else {
        return false;
    };
    if !player.jump() {
        return false;
    }
    state.events.push(GameEvent::Jumped);
    true
}

fn fire(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let muzzle = match state.player.as_mut() {
        Some(player) if player.can_fire() => {
            player.fire_cooldown = state.tuning.projectile.fire_cooldown;
            player.muzzle(&state.tuning.projectile)
        }
        _ => return false,
    };

    let id = state.next_entity_id();
    let shot = Projectile::new(id, muzzle, &state.tuning.projectile);
    state.events.push(GameEvent::ProjectileFired { id });
    state.events.push(GameEvent::Spawned {
        id,
        kind: EntityKind::Projectile,
        pos: shot.pos,
    });
    state.projectiles.push(shot);
    true
}

fn spawn_enemy(state: &mut GameState, mode: EnemyMode, speed: f32) {
    let id = state.next_entity_id();
    let enemy = Enemy::spawn(
        id,
        mode,
        speed,
        &state.tuning.enemy,
        &state.playfield,
        &mut state.rng,
    );
    log::debug!("Spawned {:?} enemy {} at speed {:.4}", mode, id, speed);
    state.events.push(GameEvent::Spawned {
        id,
        kind: EntityKind::Enemy,
        pos: enemy.pos,
    });
    state.enemies.push(enemy);
}

fn spawn_obstacle(state: &mut GameState, variant: usize, speed: f32) {
    let Some(size) = state
        .tuning
        .obstacle
        .catalog
        .get(variant)
        .map(|entry| glam::Vec2::new(entry.width, entry.height))
    else {
        return;
    };
    let id = state.next_entity_id();
    let obstacle = Obstacle::spawn(id, variant, size, speed, &state.playfield);
    log::debug!("Spawned obstacle {} (variant {}) at speed {:.4}", id, variant, speed);
    state.events.push(GameEvent::Spawned {
        id,
        kind: EntityKind::Obstacle,
        pos: obstacle.pos,
    });
    state.obstacles.push(obstacle);
}

/// Shuriken vs enemies, newest shuriken first against newest enemy first.
///
/// A shuriken kills at most one enemy per tick.
fn resolve_projectile_hits(state: &mut GameState) -> u32 {
    let mut kills = 0;

    for shot in state.projectiles.iter_mut().rev() {
        if !shot.active {
            continue;
        }
        let shot_bounds = shot.bounds();

        for enemy in state.enemies.iter_mut().rev() {
            if !enemy.active || !shot_bounds.intersects(&enemy.bounds()) {
                continue;
            }
            shot.active = false;
            enemy.active = false;
            state.score.add_kill();
            state.events.push(GameEvent::EnemyDestroyed {
                id: enemy.id,
                pos: enemy.pos,
                tint: DESTROY_EFFECT_TINT,
            });
            kills += 1;
            break;
        }
    }

    if kills > 0 {
        log::debug!("{} enemies destroyed on tick {}", kills, state.tick_count);
        purge_inactive(&mut state.projectiles, &mut state.events, DestroyCause::Hit);
        purge_inactive(&mut state.enemies, &mut state.events, DestroyCause::Hit);
    }
    kills
}

/// Does the player touch any enemy or obstacle?
fn player_is_hit(state: &GameState) -> bool {
    let Some(player) = &state.player else {
        return false;
    };
    let player_bounds = player.bounds();

    state
        .enemies
        .iter()
        .any(|e| e.active && player_bounds.intersects(&e.bounds()))
        || state
            .obstacles
            .iter()
            .any(|o| o.active && player_bounds.intersects(&o.bounds()))
}

/// Advance the game by one tick. No-op unless playing.
pub fn tick(state: &mut GameState, dt: f32) -> TickReport {
    if state.phase != GamePhase::Playing {
        return TickReport::idle(state);
    }

    // A bad clock sample must not poison the timers
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring frame delta {} on tick {}", dt, state.tick_count + 1);
        0.0
    };

    state.tick_count += 1;

    // 1. Difficulty ramp
    let speed = state.difficulty.ramp();

    // 2. Player
    if let Some(player) = state.player.as_mut() {
        if player.update(dt) == BodyStep::Landed {
            state.events.push(GameEvent::PlayerLanded);
        }
    }
    if state.tuning.projectile.auto_fire {
        fire(state);
    }

    // 3. Spawning
    let plan = state.spawner.step(
        dt,
        &state.tuning.spawn,
        &state.tuning.enemy.modes,
        state.tuning.obstacle.catalog.len(),
        &mut state.rng,
    );
    if let Some(mode) = plan.enemy {
        spawn_enemy(state, mode, speed);
    }
    if let Some(variant) = plan.obstacle {
        spawn_obstacle(state, variant, speed);
    }

    // 4. Integrate
    for enemy in &mut state.enemies {
        match enemy.update(&state.tuning.enemy, &state.playfield, &mut state.rng) {
            EnemyStep::TookOff => state.events.push(GameEvent::EnemyAirborne { id: enemy.id }),
            EnemyStep::Landed => state.events.push(GameEvent::EnemyLanded { id: enemy.id }),
            EnemyStep::Hopped => {
                state.events.push(GameEvent::EnemyAirborne { id: enemy.id });
                state.events.push(GameEvent::EnemyLanded { id: enemy.id });
            }
            EnemyStep::Steady => {}
        }
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(&state.playfield);
    }
    for shot in &mut state.projectiles {
        shot.update(&state.playfield);
    }

    // 5. Cull off-screen entities
    purge_inactive(&mut state.enemies, &mut state.events, DestroyCause::Offscreen);
    purge_inactive(&mut state.obstacles, &mut state.events, DestroyCause::Offscreen);
    purge_inactive(&mut state.projectiles, &mut state.events, DestroyCause::Offscreen);

    // 6. Collisions
    let kills = resolve_projectile_hits(state);
    state.publish_score();

    if player_is_hit(state) {
        state.game_over();
        return TickReport {
            tick: state.tick_count,
            score: state.displayed_score(),
            kills,
            game_over: true,
        };
    }

    // 7. Survival bonus
    state.score.add_survival();
    state.publish_score();

    TickReport {
        tick: state.tick_count,
        score: state.displayed_score(),
        kills,
        game_over: false,
    }
}
