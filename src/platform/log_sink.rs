//! Sink that narrates the game through `log` (headless binary)

use super::{AudioSink, RenderSink, UiSink};
use crate::sim::{AudioCue, Frame, GameEvent, GamePhase};

#[derive(Debug, Default)]
pub struct LogSink {
    last_phase: Option<GamePhase>,
    last_score: u64,
}

impl RenderSink for LogSink {
    fn draw(&mut self, frame: &Frame) {
        log::trace!(
            "tick {} speed {:.4} entities {}",
            frame.tick,
            frame.speed,
            frame.entities.len()
        );
    }

    fn effect(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyDestroyed { id, pos, .. } => {
                log::debug!("Enemy {} destroyed at ({:.0}, {:.0})", id, pos.x, pos.y)
            }
            GameEvent::EnemyAirborne { id } => log::trace!("Enemy {} hops", id),
            _ => log::trace!("{:?}", event),
        }
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        log::trace!("sfx {:?}", cue);
    }
}

impl UiSink for LogSink {
    fn show(&mut self, score: u64, phase: GamePhase) {
        if self.last_phase != Some(phase) {
            log::info!("[{:?}] score {}", phase, score);
            self.last_phase = Some(phase);
        } else if score / 10 != self.last_score / 10 {
            log::debug!("score {}", score);
        }
        self.last_score = score;
    }

    fn final_score(&mut self, score: u64) {
        log::info!("Final score: {}", score);
    }
}
