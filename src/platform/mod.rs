//! Platform abstraction layer
//!
//! The simulation core never draws, plays sound or reads devices. Frontends
//! plug in through these sinks and feed commands through a [`Driver`]:
//! - Render: active entities once per frame, plus spawn/destroy effects
//! - Audio: semantic cues with no parameters
//! - UI: score and phase every frame, final score on game over

pub mod driver;
pub mod log_sink;

pub use driver::Driver;
pub use log_sink::LogSink;

use crate::sim::{AudioCue, Frame, GameEvent, GamePhase};

/// Receives the drawable world
pub trait RenderSink {
    /// Called once per frame with every active entity
    fn draw(&mut self, frame: &Frame);

    /// Called for each visual event (spawns, destroys, sprite swaps)
    fn effect(&mut self, _event: &GameEvent) {}
}

/// Receives sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Receives HUD state
pub trait UiSink {
    fn show(&mut self, score: u64, phase: GamePhase);

    fn final_score(&mut self, _score: u64) {}
}

/// Sink that ignores everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _frame: &Frame) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _cue: AudioCue) {}
}

impl UiSink for NullSink {
    fn show(&mut self, _score: u64, _phase: GamePhase) {}
}
