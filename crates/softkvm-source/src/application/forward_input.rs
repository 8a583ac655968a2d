//! ForwardInputUseCase: the local/remote switch state machine.
//!
//! This use case is the heart of the source application. It receives raw
//! input notifications from the capture service, decides per notification
//! whether to treat it as a mode toggle, consume it locally, or translate
//! it into a wire event, and hands forwarded events to the
//! [`EventTransmitter`].
//!
//! # Architecture
//!
//! The use case depends only on traits (`EventTransmitter`,
//! `SuppressionController`) and the pure [`MotionDeltaTracker`]. All
//! infrastructure implementations are injected at construction time, making
//! the state machine fully unit-testable.

use std::sync::Arc;

use async_trait::async_trait;
use softkvm_core::{Event, KeyAction, KeyEvent, KeyIdentity, MouseEvent, SpecialKey};
use tracing::info;

use crate::application::motion::MotionDeltaTracker;
use crate::infrastructure::capture::RawInputEvent;

/// Trait for delivering translated events toward the sink.
///
/// Delivery is best-effort and infallible from the caller's perspective:
/// implementations log transport failures and recover internally, and must
/// never surface them to the input path. The production implementation is
/// the source connection manager; tests record calls.
#[async_trait]
pub trait EventTransmitter: Send + Sync {
    /// Hands one event to the transport. Drops it silently when no
    /// connection is established.
    async fn send(&self, event: Event);
}

/// Trait for toggling OS-level suppression of the physical input devices.
///
/// While suppressed, raw notifications keep arriving but the OS no longer
/// applies their default effect on the source machine.
pub trait SuppressionController: Send + Sync {
    fn set_suppressed(&self, suppressed: bool);
}

/// Whether input currently acts on the source machine or the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchMode {
    /// Input acts only on the source machine; nothing is forwarded.
    Local,
    /// Input is forwarded to the sink and suppressed locally.
    Remote,
}

impl std::fmt::Display for SwitchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchMode::Local => f.write_str("local"),
            SwitchMode::Remote => f.write_str("remote"),
        }
    }
}

/// The reserved keys that force a mode switch.
///
/// Both keys are swallowed entirely: neither their press nor their release
/// is ever forwarded or allowed to reach the sink as a stray event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleKeys {
    /// Pressing this key forces [`SwitchMode::Local`].
    pub to_local: SpecialKey,
    /// Pressing this key forces [`SwitchMode::Remote`].
    pub to_remote: SpecialKey,
}

impl Default for ToggleKeys {
    fn default() -> Self {
        Self {
            to_local: SpecialKey::F1,
            to_remote: SpecialKey::F2,
        }
    }
}

/// The Forward Input use case.
///
/// Owns the switch mode and the motion delta tracker; constructed once at
/// startup and driven by a single consumer of the capture channel, so each
/// notification is handled to completion before the next is observed.
pub struct ForwardInputUseCase {
    mode: SwitchMode,
    toggles: ToggleKeys,
    tracker: MotionDeltaTracker,
    transmitter: Arc<dyn EventTransmitter>,
    suppression: Arc<dyn SuppressionController>,
}

impl ForwardInputUseCase {
    /// Creates a new use case in [`SwitchMode::Local`].
    pub fn new(
        toggles: ToggleKeys,
        transmitter: Arc<dyn EventTransmitter>,
        suppression: Arc<dyn SuppressionController>,
    ) -> Self {
        Self {
            mode: SwitchMode::Local,
            toggles,
            tracker: MotionDeltaTracker::new(),
            transmitter,
            suppression,
        }
    }

    /// Returns the current switch mode.
    pub fn mode(&self) -> SwitchMode {
        self.mode
    }

    /// Handles one raw input notification from the capture service.
    pub async fn handle_event(&mut self, notification: RawInputEvent) {
        match notification {
            RawInputEvent::KeyDown { key } => {
                if let Some(target) = self.toggle_target(&key) {
                    self.switch_to(target);
                    return;
                }
                if self.mode == SwitchMode::Remote {
                    self.transmitter
                        .send(Event::Key(KeyEvent {
                            action: KeyAction::Down,
                            key,
                        }))
                        .await;
                }
            }
            RawInputEvent::KeyUp { key } => {
                // Mode already changed on the press; the release is swallowed
                // so no stray key-up reaches either side.
                if self.toggle_target(&key).is_some() {
                    return;
                }
                if self.mode == SwitchMode::Remote {
                    self.transmitter
                        .send(Event::Key(KeyEvent {
                            action: KeyAction::Up,
                            key,
                        }))
                        .await;
                }
            }
            RawInputEvent::PointerMove { x, y } => {
                let forward = self.mode == SwitchMode::Remote;
                if let Some((dx, dy)) = self.tracker.track(x, y, forward) {
                    self.transmitter
                        .send(Event::Mouse(MouseEvent::Move { dx, dy }))
                        .await;
                }
            }
            RawInputEvent::ButtonDown { button } => {
                if self.mode == SwitchMode::Remote {
                    self.transmitter
                        .send(Event::Mouse(MouseEvent::Click {
                            button,
                            action: KeyAction::Down,
                        }))
                        .await;
                }
            }
            RawInputEvent::ButtonUp { button } => {
                if self.mode == SwitchMode::Remote {
                    self.transmitter
                        .send(Event::Mouse(MouseEvent::Click {
                            button,
                            action: KeyAction::Up,
                        }))
                        .await;
                }
            }
            RawInputEvent::Scroll { dx, dy } => {
                if self.mode == SwitchMode::Remote && (dx != 0 || dy != 0) {
                    self.transmitter
                        .send(Event::Mouse(MouseEvent::Scroll { dx, dy }))
                        .await;
                }
            }
        }
    }

    /// Returns the mode a toggle key press requests, or `None` for ordinary keys.
    fn toggle_target(&self, key: &KeyIdentity) -> Option<SwitchMode> {
        let KeyIdentity::Special(special) = key else {
            return None;
        };
        if *special == self.toggles.to_local {
            Some(SwitchMode::Local)
        } else if *special == self.toggles.to_remote {
            Some(SwitchMode::Remote)
        } else {
            None
        }
    }

    /// Switches mode and applies OS-level suppression in the same step.
    ///
    /// Suppression must change together with the mode, before the next
    /// notification is processed, so input never double-acts on both
    /// machines.
    fn switch_to(&mut self, target: SwitchMode) {
        if self.mode == target {
            return;
        }
        self.mode = target;
        self.suppression.set_suppressed(self.mode == SwitchMode::Remote);
        info!("switched to {}", self.mode);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
