//! Difficulty ramp and score accumulator

use serde::{Deserialize, Serialize};

use crate::tuning::{ScoringTuning, Tuning};

/// Global scroll speed; never decreases during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    base_speed: f32,
    ramp: f32,
    speed: f32,
    /// Total scrolled distance this run (for parallax layers)
    distance: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_scroll_speed,
            ramp: tuning.scroll_ramp,
            speed: tuning.base_scroll_speed,
            distance: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.speed = self.base_speed;
        self.distance = 0.0;
    }

    /// Increase speed by one tick's worth and scroll the world
    pub fn ramp(&mut self) -> f32 {
        self.speed += self.ramp;
        self.distance += self.speed;
        self.speed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

const DISPLAY_EPSILON: f64 = 1e-9;

/// Survival + kill score, kept fractional and shown floored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    value: f64,
    survival_increment: f64,
    kill_bonus: f64,
}

impl Score {
    pub fn new(tuning: &ScoringTuning) -> Self {
        Self {
            value: 0.0,
            survival_increment: tuning.survival_increment,
            kill_bonus: tuning.kill_bonus,
        }
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn add_survival(&mut self) {
        self.value += self.survival_increment;
    }

    pub fn add_kill(&mut self) {
        self.value += self.kill_bonus;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Integer score for display
    pub fn displayed(&self) -> u64 {
        // Absorb accumulated 0.1 steps landing a hair under an integer
        (self.value + DISPLAY_EPSILON).floor() as u64
    }
}
