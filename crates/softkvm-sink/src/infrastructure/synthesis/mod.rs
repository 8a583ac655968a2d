//! Input synthesis seam for the sink application.
//!
//! Real backends (SendInput on Windows, XTest on Linux, CGEvent on macOS)
//! are collaborators outside this crate's scope. The [`InputSynthesizer`]
//! trait is the boundary; the applier calls exactly one of its methods per
//! decoded event.

use softkvm_core::{KeyIdentity, MouseButton, SpecialKey};
use thiserror::Error;

pub mod mock;
pub mod noop;

/// Error type for synthesis operations.
///
/// All variants are *soft* failures from the transport's point of view: the
/// offending event is logged and dropped, the connection stays up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// The platform has no way to synthesize this named key.
    #[error("no platform mapping for key {0}")]
    UnmappedKey(SpecialKey),
    /// The platform has no way to synthesize this button.
    #[error("no platform mapping for button {0:?}")]
    UnmappedButton(MouseButton),
    /// The OS injection call itself failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Platform-agnostic input synthesis trait.
///
/// Implementations for platforms without x1/x2 side buttons must degrade
/// [`MouseButton::X1`]/[`MouseButton::X2`] to a defined fallback button
/// rather than fail (the previous implementation used left and right).
pub trait InputSynthesizer: Send + Sync {
    /// Presses a key.
    fn key_down(&self, key: &KeyIdentity) -> Result<(), SynthesisError>;

    /// Releases a key.
    fn key_up(&self, key: &KeyIdentity) -> Result<(), SynthesisError>;

    /// Moves the pointer by a relative displacement.
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SynthesisError>;

    /// Presses a mouse button.
    fn button_down(&self, button: MouseButton) -> Result<(), SynthesisError>;

    /// Releases a mouse button.
    fn button_up(&self, button: MouseButton) -> Result<(), SynthesisError>;

    /// Scrolls by the given wheel deltas.
    fn scroll(&self, dx: i32, dy: i32) -> Result<(), SynthesisError>;
}
