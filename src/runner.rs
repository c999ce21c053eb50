//! Host frame loop
//!
//! Glue between a display-refresh style callback and the simulation:
//! input delivery, the spawn timer, fixed-step ticks and one render per frame.

use crate::consts::{FRAME_MS, MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::input::InputSource;
use crate::render::{Renderer, draw_frame};
use crate::sim::{SimEvent, Simulation, tick};

pub struct GameLoop {
    pub sim: Simulation,
    /// Events from the most recent frame, replaced every frame
    pub events: Vec<SimEvent>,
    /// Wall time not yet consumed by ticks
    accumulator: u64,
    /// Total wall time fed in
    pub wall_ms: u64,
    pub frames: u64,
}

impl GameLoop {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            events: Vec::new(),
            accumulator: 0,
            wall_ms: 0,
            frames: 0,
        }
    }

    /// Run one host frame covering `elapsed_ms` of wall time.
    /// Returns the number of ticks run; the frame's events are left in
    /// `self.events`.
    pub fn frame<I, R>(&mut self, elapsed_ms: u64, input: &mut I, renderer: &mut R) -> u32
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        // Long stalls (tab hidden, debugger) are not replayed in full
        let elapsed_ms = elapsed_ms.min(MAX_FRAME_MS);
        self.wall_ms += elapsed_ms;
        self.frames += 1;

        for event in input.poll(self.wall_ms) {
            self.sim.handle_input(event);
        }

        // Spawns are appended between ticks, never during one
        self.sim.advance_spawner(elapsed_ms);

        self.accumulator += elapsed_ms;
        let step = u64::from(FRAME_MS);
        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            tick(&mut self.sim, FRAME_MS);
            self.accumulator -= step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= step {
            log::warn!(
                "Frame {} fell behind, dropping {} ms",
                self.frames,
                self.accumulator
            );
            self.accumulator %= step;
        }

        self.events = self.sim.take_events();
        draw_frame(&self.sim, renderer);
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::input::{Key, ScriptedInput};
    use crate::render::RecordingRenderer;

    fn game() -> GameLoop {
        GameLoop::new(Simulation::new(Tuning::default(), 99).unwrap())
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        let mut r = RecordingRenderer::default();

        assert_eq!(g.frame(10, &mut input, &mut r), 0);
        assert_eq!(g.frame(10, &mut input, &mut r), 1);
        assert_eq!(g.frame(30, &mut input, &mut r), 2);
        assert_eq!(g.sim.time_ticks, 3);
        assert_eq!(r.frames, 3);
    }

    #[test]
    fn test_substeps_capped() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        let mut r = RecordingRenderer::default();
        assert_eq!(g.frame(10_000, &mut input, &mut r), MAX_SUBSTEPS);
        assert_eq!(g.frame(0, &mut input, &mut r), 0);
    }

    #[test]
    fn test_spawns_follow_wall_time() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        let mut r = RecordingRenderer::default();
        let mut spawned = 0;
        // 9 seconds of 60 Hz frames
        for _ in 0..540 {
            g.frame(16, &mut input, &mut r);
            spawned += g
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::EnemySpawned { .. }))
                .count();
        }
        assert_eq!(spawned, 2);
        assert!(g.sim.take_events().is_empty());
    }

    #[test]
    fn test_frame_drains_simulation_events() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        input.press(Key::Melee, 0, 50);
        let mut r = RecordingRenderer::default();

        g.frame(16, &mut input, &mut r);
        assert!(matches!(g.events[0], SimEvent::AttackStarted { .. }));
        assert!(g.sim.take_events().is_empty());

        // Nothing happens on an idle frame, so the previous batch is gone
        g.frame(0, &mut input, &mut r);
        assert!(g.events.is_empty());
    }

    #[test]
    fn test_scripted_melee() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        input.press(Key::Melee, 0, 50);
        let mut r = RecordingRenderer::default();

        g.frame(16, &mut input, &mut r);
        assert!(!g.sim.player.attack.is_idle());
        for _ in 0..10 {
            g.frame(16, &mut input, &mut r);
        }
        assert!(g.sim.player.attack.is_idle());
        assert!(input.is_finished());
    }
}
