//! Input capture seam for the source application.
//!
//! Real OS hook backends (low-level keyboard/mouse hooks on Windows, an
//! event tap on macOS, an evdev or X11 grab on Linux) are collaborators
//! outside this crate's scope. The [`InputSource`] trait is the boundary:
//! a backend produces [`RawInputEvent`]s on a channel from its own hook
//! thread and exposes a switch for OS-level suppression of the physical
//! devices.
//!
//! Hook callbacks must never block, so all processing is deferred out of
//! the callback through the channel.

use std::sync::mpsc;

use softkvm_core::{KeyIdentity, MouseButton};

pub mod mock;
pub mod noop;

/// A raw input notification produced by the capture backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInputEvent {
    /// A key was pressed down.
    KeyDown { key: KeyIdentity },
    /// A key was released.
    KeyUp { key: KeyIdentity },
    /// The pointer moved to an absolute screen position.
    PointerMove { x: i32, y: i32 },
    /// A mouse button was pressed.
    ButtonDown { button: MouseButton },
    /// A mouse button was released.
    ButtonUp { button: MouseButton },
    /// The wheel was scrolled.
    Scroll { dx: i32, dy: i32 },
}

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install input hook: {0}")]
    HookInstallFailed(String),
    #[error("capture service has already been stopped")]
    AlreadyStopped,
}

/// Trait abstracting raw input event production.
///
/// Production implementations wrap an OS hook; tests use
/// [`mock::MockInputSource`]; the headless binary uses
/// [`noop::NoopInputSource`].
pub trait InputSource: Send + Sync {
    /// Starts the capture backend and returns a receiver for raw events.
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError>;

    /// Stops the capture backend and releases all OS resources.
    fn stop(&self);

    /// Enables or disables OS-level suppression of the physical devices.
    ///
    /// While suppressed, events continue to arrive on the channel but their
    /// default local effect is blocked.
    fn set_suppressed(&self, suppressed: bool);
}
