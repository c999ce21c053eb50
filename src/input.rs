//! Keyboard input
//!
//! Hosts translate their native key events into `InputEvent`s and hand them
//! to `Simulation::handle_input` between ticks.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Ranged attack trigger
    Ranged,
    /// Melee attack trigger
    Melee,
}

impl Key {
    /// Map a DOM-style key code (`KeyboardEvent.key`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "a" | "A" => Some(Key::Ranged),
            "s" | "S" => Some(Key::Melee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Anything that can report key events since the last poll
pub trait InputSource {
    /// Events that happened up to `now_ms`, oldest first
    fn poll(&mut self, now_ms: u64) -> Vec<InputEvent>;
}

/// Replays a fixed list of timed events (demos, tests)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    /// `script` is sorted by time before use
    pub fn new(mut script: Vec<(u64, InputEvent)>) -> Self {
        script.sort_by_key(|(at, _)| *at);
        Self {
            script: script.into(),
        }
    }

    /// Press at `at_ms` and release `hold_ms` later
    pub fn press(&mut self, key: Key, at_ms: u64, hold_ms: u64) {
        let mut script: Vec<_> = self.script.drain(..).collect();
        script.push((at_ms, InputEvent::KeyDown(key)));
        script.push((at_ms + hold_ms, InputEvent::KeyUp(key)));
        *self = Self::new(script);
    }

    pub fn is_finished(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, now_ms: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while self.script.front().is_some_and(|(at, _)| *at <= now_ms) {
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        events
    }
}
