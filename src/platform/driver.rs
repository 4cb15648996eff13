//! Frame driver: queued commands in, one tick, events out

use std::collections::VecDeque;

use super::{AudioSink, RenderSink, UiSink};
use crate::sim::{Command, GameEvent, GameState, TickReport, apply_command, tick};

/// Owns the game and routes everything between it and the sinks.
///
/// Commands queued between frames are applied in arrival order right before
/// the frame's tick, so no command ever lands mid-tick.
pub struct Driver<R, A, U> {
    state: GameState,
    pending: VecDeque<Command>,
    render: R,
    audio: A,
    ui: U,
}

impl<R: RenderSink, A: AudioSink, U: UiSink> Driver<R, A, U> {
    pub fn new(state: GameState, render: R, audio: A, ui: U) -> Self {
        Self {
            state,
            pending: VecDeque::new(),
            render,
            audio,
            ui,
        }
    }

    /// Queue an input command for the next frame
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Run one frame with the clock's delta
    pub fn frame(&mut self, dt: f32) -> TickReport {
        while let Some(command) = self.pending.pop_front() {
            apply_command(&mut self.state, command);
        }

        let report = tick(&mut self.state, dt);

        for event in self.state.drain_events() {
            self.dispatch(&event);
        }

        self.render.draw(&self.state.frame());
        self.ui.show(self.state.displayed_score(), self.state.phase);
        report
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if event.is_visual() {
            self.render.effect(event);
        }
        if let Some(cue) = event.audio_cue() {
            self.audio.play(cue);
        }
        if let GameEvent::PlayerDied { final_score } = event {
            self.ui.final_score(*final_score);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios (tests, replays)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }
}
