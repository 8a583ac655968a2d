//! No-op synthesizer for headless operation.
//!
//! Logs every call at debug level and injects nothing. Used when no
//! platform backend is wired in.

use softkvm_core::{KeyIdentity, MouseButton};
use tracing::debug;

use super::{InputSynthesizer, SynthesisError};

/// An [`InputSynthesizer`] that only logs.
#[derive(Debug, Default)]
pub struct NoopSynthesizer;

impl NoopSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl InputSynthesizer for NoopSynthesizer {
    fn key_down(&self, key: &KeyIdentity) -> Result<(), SynthesisError> {
        debug!("noop synthesis: key down {key:?}");
        Ok(())
    }

    fn key_up(&self, key: &KeyIdentity) -> Result<(), SynthesisError> {
        debug!("noop synthesis: key up {key:?}");
        Ok(())
    }

    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SynthesisError> {
        debug!("noop synthesis: move by ({dx}, {dy})");
        Ok(())
    }

    fn button_down(&self, button: MouseButton) -> Result<(), SynthesisError> {
        debug!("noop synthesis: button down {button:?}");
        Ok(())
    }

    fn button_up(&self, button: MouseButton) -> Result<(), SynthesisError> {
        debug!("noop synthesis: button up {button:?}");
        Ok(())
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<(), SynthesisError> {
        debug!("noop synthesis: scroll by ({dx}, {dy})");
        Ok(())
    }
}
