//! Recording synthesizer for unit and integration testing.

use std::collections::HashSet;
use std::sync::Mutex;

use softkvm_core::{KeyIdentity, MouseButton, SpecialKey};

use super::{InputSynthesizer, SynthesisError};

/// Every synthesis call a test can observe, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisCall {
    KeyDown(KeyIdentity),
    KeyUp(KeyIdentity),
    MoveRelative(i32, i32),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Scroll(i32, i32),
}

/// An [`InputSynthesizer`] that records calls instead of injecting input.
///
/// Named keys can be marked as unmapped to exercise the soft-failure path
/// a real platform takes on a key-symbol table miss.
#[derive(Default)]
pub struct RecordingSynthesizer {
    calls: Mutex<Vec<SynthesisCall>>,
    unmapped_keys: Mutex<HashSet<SpecialKey>>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a named key as missing from the simulated platform table.
    pub fn mark_unmapped(&self, key: SpecialKey) {
        self.unmapped_keys
            .lock()
            .expect("lock poisoned")
            .insert(key);
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn check_key(&self, key: &KeyIdentity) -> Result<(), SynthesisError> {
        if let KeyIdentity::Special(special) = key {
            if self
                .unmapped_keys
                .lock()
                .expect("lock poisoned")
                .contains(special)
            {
                return Err(SynthesisError::UnmappedKey(*special));
            }
        }
        Ok(())
    }

    fn record(&self, call: SynthesisCall) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl InputSynthesizer for RecordingSynthesizer {
    fn key_down(&self, key: &KeyIdentity) -> Result<(), SynthesisError> {
        self.check_key(key)?;
        self.record(SynthesisCall::KeyDown(*key));
        Ok(())
    }

    fn key_up(&self, key: &KeyIdentity) -> Result<(), SynthesisError> {
        self.check_key(key)?;
        self.record(SynthesisCall::KeyUp(*key));
        Ok(())
    }

    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SynthesisError> {
        self.record(SynthesisCall::MoveRelative(dx, dy));
        Ok(())
    }

    fn button_down(&self, button: MouseButton) -> Result<(), SynthesisError> {
        self.record(SynthesisCall::ButtonDown(button));
        Ok(())
    }

    fn button_up(&self, button: MouseButton) -> Result<(), SynthesisError> {
        self.record(SynthesisCall::ButtonUp(button));
        Ok(())
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<(), SynthesisError> {
        self.record(SynthesisCall::Scroll(dx, dy));
        Ok(())
    }
}
