/// Keyboard handling on top of crossterm events.
///
/// Input model: instead of trusting the terminal to report key state, we keep
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and treat them as held.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{HeldKeys, TickInput};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  6 frames @ 50 FPS = 120 ms, shorter than any sane OS key-repeat
/// delay once repeating has started.
pub const HOLD_WINDOW: u64 = 6;

/// What a single event asks the game loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Fire,
    Quit,
}

/// Input gathered for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    pub fire_presses: u32,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one event and report any one-shot action it triggers.
    pub fn apply(&mut self, event: &Event) -> Action {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return Action::None;
        };
        match kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                self.key_frame.insert(*code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Action::Quit
                    }
                    KeyCode::Char(' ') => Action::Fire,
                    _ => Action::None,
                }
            }
            // Repeat: refresh timestamp so key stays "held"; never fires
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, self.frame);
                Action::None
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(code);
                Action::None
            }
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    /// Combine this frame's one-shot input with the currently held keys.
    pub fn tick_input(&self, frame: &FrameInput) -> TickInput {
        TickInput {
            held: self.held(),
            fire_presses: frame.fire_presses,
        }
    }
}

/// Drain all pending terminal events without blocking.  Stops early on quit.
pub fn drain_events(tracker: &mut KeyTracker) -> std::io::Result<FrameInput> {
    tracker.begin_frame();
    let mut input = FrameInput::default();
    while event::poll(Duration::ZERO)? {
        match tracker.apply(&event::read()?) {
            Action::Quit => {
                input.quit = true;
                break;
            }
            Action::Fire => input.fire_presses += 1,
            Action::None => {}
        }
    }
    Ok(input)
}
