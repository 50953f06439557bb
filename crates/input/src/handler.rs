//! Per-tick button sampler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout
//! counted in ticks.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Button, ButtonSet, InputFrame};

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state. Ticks at ~60 Hz.
const DEFAULT_KEY_RELEASE_TIMEOUT_TICKS: u32 = 9;

const BUTTON_COUNT: usize = Button::ALL.len();

/// Tracks held buttons between samples.
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    held: ButtonSet,
    /// Buttons pressed since the last sample, even if already released.
    taps: ButtonSet,
    prev: ButtonSet,
    /// Ticks since each button last saw a press or repeat event.
    idle_ticks: [u32; BUTTON_COUNT],
    key_release_timeout_ticks: u32,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self {
            held: ButtonSet::EMPTY,
            taps: ButtonSet::EMPTY,
            prev: ButtonSet::EMPTY,
            idle_ticks: [0; BUTTON_COUNT],
            key_release_timeout_ticks: DEFAULT_KEY_RELEASE_TIMEOUT_TICKS,
        }
    }

    pub fn with_key_release_timeout_ticks(mut self, ticks: u32) -> Self {
        self.key_release_timeout_ticks = ticks;
        self
    }

    pub fn key_release_timeout_ticks(&self) -> u32 {
        self.key_release_timeout_ticks
    }

    /// Route a crossterm key event by kind. Returns the mapped button.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Button> {
        match key.kind {
            KeyEventKind::Release => {
                self.handle_key_release(key.code);
                map_key(key.code)
            }
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key.code),
        }
    }

    /// Returns the button when it was not already held.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Button> {
        let button = map_key(code)?;
        self.idle_ticks[button as usize] = 0;
        if self.held.contains(button) {
            return None;
        }
        self.held.insert(button);
        self.taps.insert(button);
        Some(button)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(button) = map_key(code) {
            self.held.remove(button);
        }
    }

    /// Take this tick's frame and advance the release timeout.
    pub fn sample(&mut self) -> InputFrame {
        // Auto-release when terminal does not emit release events.
        for button in Button::ALL {
            if self.held.contains(button)
                && self.idle_ticks[button as usize] > self.key_release_timeout_ticks
            {
                self.held.remove(button);
            }
        }

        let mut now = self.held;
        for button in Button::ALL {
            if self.taps.contains(button) {
                now.insert(button);
            }
        }

        let frame = InputFrame::from_levels(self.prev, now);
        self.prev = now;
        self.taps = ButtonSet::EMPTY;
        for ticks in &mut self.idle_ticks {
            *ticks = ticks.saturating_add(1);
        }
        frame
    }

    pub fn reset(&mut self) {
        *self = Self::new().with_key_release_timeout_ticks(self.key_release_timeout_ticks);
    }
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new()
    }
}
