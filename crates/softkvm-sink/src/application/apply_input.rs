//! ApplyInputUseCase: maps decoded wire events to synthesis calls.
//!
//! Each event maps to exactly one [`InputSynthesizer`] method. Synthesis
//! failures are returned to the serving loop, which logs and drops the
//! individual event; nothing here can take the connection down.

use std::sync::Arc;

use softkvm_core::{Event, KeyAction, MouseEvent};

use crate::infrastructure::synthesis::{InputSynthesizer, SynthesisError};

/// The Apply Input use case.
pub struct ApplyInputUseCase {
    synthesizer: Arc<dyn InputSynthesizer>,
}

impl ApplyInputUseCase {
    /// Creates a new use case with the given platform synthesizer.
    pub fn new(synthesizer: Arc<dyn InputSynthesizer>) -> Self {
        Self { synthesizer }
    }

    /// Replays one decoded event as synthetic input.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError`] when the platform cannot map or inject
    /// the event. The caller treats this as a per-event soft failure.
    pub fn apply(&self, event: &Event) -> Result<(), SynthesisError> {
        match event {
            Event::Key(key_event) => match key_event.action {
                KeyAction::Down => self.synthesizer.key_down(&key_event.key),
                KeyAction::Up => self.synthesizer.key_up(&key_event.key),
            },
            Event::Mouse(MouseEvent::Move { dx, dy }) => {
                self.synthesizer.move_relative(*dx, *dy)
            }
            Event::Mouse(MouseEvent::Click { button, action }) => match action {
                KeyAction::Down => self.synthesizer.button_down(*button),
                KeyAction::Up => self.synthesizer.button_up(*button),
            },
            Event::Mouse(MouseEvent::Scroll { dx, dy }) => self.synthesizer.scroll(*dx, *dy),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
