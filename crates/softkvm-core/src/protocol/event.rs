//! The SoftKVM wire event model.
//!
//! Every frame on the wire is one of four event shapes. Field names and
//! enumerated string values are the compatibility surface shared with the
//! previous version of either endpoint and must be reproduced verbatim:
//!
//! ```json
//! {"kind":"key","action":"down","key":{"type":"char","value":"a"}}
//! {"kind":"key","action":"up","key":{"type":"special","value":"f1"}}
//! {"kind":"mouse","event":"move","dx":5,"dy":-2}
//! {"kind":"mouse","event":"click","button":"left","action":"down"}
//! {"kind":"mouse","event":"scroll","dx":0,"dy":1}
//! ```
//!
//! Events are immutable once constructed and carry no timestamp or sequence
//! number: ordering is implied by TCP stream order and the single active
//! connection, and events are never reordered or batched.

use serde::{Deserialize, Serialize};

use crate::keymap::SpecialKey;

/// A single transportable input event, discriminated by the `"kind"` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    /// A keyboard press or release.
    Key(KeyEvent),
    /// A mouse move, click, or scroll.
    Mouse(MouseEvent),
}

/// Press/release discriminator, shared by key and click events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Down,
    Up,
}

/// Keyboard event payload: which key, pressed or released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Press or release.
    pub action: KeyAction,
    /// Identity of the key.
    pub key: KeyIdentity,
}

/// Identity of a keyboard key.
///
/// Printable characters travel as their code point; everything else
/// (arrows, function keys, modifiers) travels as a stable name from the
/// shared [`SpecialKey`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum KeyIdentity {
    /// A printable character, e.g. `'a'`.
    Char(char),
    /// A named non-printable key, e.g. `SpecialKey::F1`.
    Special(SpecialKey),
}

/// Mouse event payload, discriminated by the `"event"` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum MouseEvent {
    /// Relative pointer displacement. Never emitted with `dx == 0 && dy == 0`.
    Move { dx: i32, dy: i32 },
    /// Button press or release.
    Click { button: MouseButton, action: KeyAction },
    /// Wheel scroll. Never emitted with `dx == 0 && dy == 0`.
    Scroll { dx: i32, dy: i32 },
}

/// Mouse button identifier.
///
/// `X1`/`X2` (the side buttons) may be absent on a given platform; a
/// synthesizer without them must degrade to a defined fallback button
/// rather than fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
