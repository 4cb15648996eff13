//! Procedural spawn timers
//!
//! Two independent countdowns (enemy, obstacle) decremented by delta-time.
//! A timer that expires yields exactly one spawn order for that tick, no
//! matter how far negative a long frame pushed it, and is re-armed from its
//! random window.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{EnemyMode, SpawnTuning};

/// What the spawner wants created this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub enemy: Option<EnemyMode>,
    /// Obstacle catalog index
    pub obstacle: Option<usize>,
}

#[cfg(test)]
impl SpawnPlan {
    fn is_empty(&self) -> bool {
        self.enemy.is_none() && self.obstacle.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub enemy_timer: f32,
    pub obstacle_timer: f32,
}

impl Spawner {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            enemy_timer: tuning.initial_enemy_delay,
            obstacle_timer: tuning.initial_obstacle_delay,
        }
    }

    /// Re-arm both timers with their initial delays
    pub fn reset(&mut self, tuning: &SpawnTuning) {
        *self = Self::new(tuning);
    }

    /// Count down by `dt`; pick variants for whatever expired.
    ///
    /// Draw order is fixed (enemy variant, enemy timer, obstacle variant,
    /// obstacle timer) so runs replay identically from the same seed.
    pub fn step<R: Rng>(
        &mut self,
        dt: f32,
        tuning: &SpawnTuning,
        enemy_modes: &[EnemyMode],
        catalog_len: usize,
        rng: &mut R,
    ) -> SpawnPlan {
        let mut plan = SpawnPlan::default();

        self.enemy_timer -= dt;
        if self.enemy_timer <= 0.0 {
            if !enemy_modes.is_empty() {
                plan.enemy = Some(enemy_modes[rng.random_range(0..enemy_modes.len())]);
            }
            self.enemy_timer = tuning.enemy_interval.sample(rng);
        }

        self.obstacle_timer -= dt;
        if self.obstacle_timer <= 0.0 {
            if catalog_len > 0 {
                plan.obstacle = Some(rng.random_range(0..catalog_len));
            }
            self.obstacle_timer = tuning.obstacle_interval.sample(rng);
        }

        plan
    }
}
