//! The static named-key table shared by both endpoints.
//!
//! Non-printable keys travel on the wire as stable name strings
//! (`"f1"`, `"shift_l"`, `"caps_lock"`, ...). The wire format depends on
//! these names staying identical across implementations and platforms, so
//! the table is an explicit, hand-maintained enumeration rather than
//! whatever symbol set a given hook library exposes at runtime.
//!
//! The name strings are carried over unchanged from the previous
//! implementation for interoperability.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A named non-printable key.
///
/// Serializes to and from its stable wire name via [`SpecialKey::name`] and
/// [`SpecialKey::from_name`]. An unknown name on the wire is a decode error;
/// whether a *known* key can actually be synthesized is a per-platform
/// concern of the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Alt,
    AltGr,
    AltL,
    AltR,
    Backspace,
    CapsLock,
    Cmd,
    CmdL,
    CmdR,
    Ctrl,
    CtrlL,
    CtrlR,
    Delete,
    Down,
    End,
    Enter,
    Esc,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    Home,
    Insert,
    Left,
    MediaNext,
    MediaPlayPause,
    MediaPrevious,
    MediaVolumeDown,
    MediaVolumeMute,
    MediaVolumeUp,
    Menu,
    NumLock,
    PageDown,
    PageUp,
    Pause,
    PrintScreen,
    Right,
    ScrollLock,
    Shift,
    ShiftL,
    ShiftR,
    Space,
    Tab,
    Up,
}

impl SpecialKey {
    /// Every supported named key, in wire-name order.
    pub const ALL: &'static [SpecialKey] = &[
        SpecialKey::Alt,
        SpecialKey::AltGr,
        SpecialKey::AltL,
        SpecialKey::AltR,
        SpecialKey::Backspace,
        SpecialKey::CapsLock,
        SpecialKey::Cmd,
        SpecialKey::CmdL,
        SpecialKey::CmdR,
        SpecialKey::Ctrl,
        SpecialKey::CtrlL,
        SpecialKey::CtrlR,
        SpecialKey::Delete,
        SpecialKey::Down,
        SpecialKey::End,
        SpecialKey::Enter,
        SpecialKey::Esc,
        SpecialKey::F1,
        SpecialKey::F2,
        SpecialKey::F3,
        SpecialKey::F4,
        SpecialKey::F5,
        SpecialKey::F6,
        SpecialKey::F7,
        SpecialKey::F8,
        SpecialKey::F9,
        SpecialKey::F10,
        SpecialKey::F11,
        SpecialKey::F12,
        SpecialKey::F13,
        SpecialKey::F14,
        SpecialKey::F15,
        SpecialKey::F16,
        SpecialKey::F17,
        SpecialKey::F18,
        SpecialKey::F19,
        SpecialKey::F20,
        SpecialKey::Home,
        SpecialKey::Insert,
        SpecialKey::Left,
        SpecialKey::MediaNext,
        SpecialKey::MediaPlayPause,
        SpecialKey::MediaPrevious,
        SpecialKey::MediaVolumeDown,
        SpecialKey::MediaVolumeMute,
        SpecialKey::MediaVolumeUp,
        SpecialKey::Menu,
        SpecialKey::NumLock,
        SpecialKey::PageDown,
        SpecialKey::PageUp,
        SpecialKey::Pause,
        SpecialKey::PrintScreen,
        SpecialKey::Right,
        SpecialKey::ScrollLock,
        SpecialKey::Shift,
        SpecialKey::ShiftL,
        SpecialKey::ShiftR,
        SpecialKey::Space,
        SpecialKey::Tab,
        SpecialKey::Up,
    ];

    /// Returns the stable wire name of this key.
    pub fn name(self) -> &'static str {
        match self {
            SpecialKey::Alt => "alt",
            SpecialKey::AltGr => "alt_gr",
            SpecialKey::AltL => "alt_l",
            SpecialKey::AltR => "alt_r",
            SpecialKey::Backspace => "backspace",
            SpecialKey::CapsLock => "caps_lock",
            SpecialKey::Cmd => "cmd",
            SpecialKey::CmdL => "cmd_l",
            SpecialKey::CmdR => "cmd_r",
            SpecialKey::Ctrl => "ctrl",
            SpecialKey::CtrlL => "ctrl_l",
            SpecialKey::CtrlR => "ctrl_r",
            SpecialKey::Delete => "delete",
            SpecialKey::Down => "down",
            SpecialKey::End => "end",
            SpecialKey::Enter => "enter",
            SpecialKey::Esc => "esc",
            SpecialKey::F1 => "f1",
            SpecialKey::F2 => "f2",
            SpecialKey::F3 => "f3",
            SpecialKey::F4 => "f4",
            SpecialKey::F5 => "f5",
            SpecialKey::F6 => "f6",
            SpecialKey::F7 => "f7",
            SpecialKey::F8 => "f8",
            SpecialKey::F9 => "f9",
            SpecialKey::F10 => "f10",
            SpecialKey::F11 => "f11",
            SpecialKey::F12 => "f12",
            SpecialKey::F13 => "f13",
            SpecialKey::F14 => "f14",
            SpecialKey::F15 => "f15",
            SpecialKey::F16 => "f16",
            SpecialKey::F17 => "f17",
            SpecialKey::F18 => "f18",
            SpecialKey::F19 => "f19",
            SpecialKey::F20 => "f20",
            SpecialKey::Home => "home",
            SpecialKey::Insert => "insert",
            SpecialKey::Left => "left",
            SpecialKey::MediaNext => "media_next",
            SpecialKey::MediaPlayPause => "media_play_pause",
            SpecialKey::MediaPrevious => "media_previous",
            SpecialKey::MediaVolumeDown => "media_volume_down",
            SpecialKey::MediaVolumeMute => "media_volume_mute",
            SpecialKey::MediaVolumeUp => "media_volume_up",
            SpecialKey::Menu => "menu",
            SpecialKey::NumLock => "num_lock",
            SpecialKey::PageDown => "page_down",
            SpecialKey::PageUp => "page_up",
            SpecialKey::Pause => "pause",
            SpecialKey::PrintScreen => "print_screen",
            SpecialKey::Right => "right",
            SpecialKey::ScrollLock => "scroll_lock",
            SpecialKey::Shift => "shift",
            SpecialKey::ShiftL => "shift_l",
            SpecialKey::ShiftR => "shift_r",
            SpecialKey::Space => "space",
            SpecialKey::Tab => "tab",
            SpecialKey::Up => "up",
        }
    }

    /// Looks up a key by its wire name.
    ///
    /// Returns `None` for names not in the table.
    pub fn from_name(name: &str) -> Option<SpecialKey> {
        let key = match name {
            "alt" => SpecialKey::Alt,
            "alt_gr" => SpecialKey::AltGr,
            "alt_l" => SpecialKey::AltL,
            "alt_r" => SpecialKey::AltR,
            "backspace" => SpecialKey::Backspace,
            "caps_lock" => SpecialKey::CapsLock,
            "cmd" => SpecialKey::Cmd,
            "cmd_l" => SpecialKey::CmdL,
            "cmd_r" => SpecialKey::CmdR,
            "ctrl" => SpecialKey::Ctrl,
            "ctrl_l" => SpecialKey::CtrlL,
            "ctrl_r" => SpecialKey::CtrlR,
            "delete" => SpecialKey::Delete,
            "down" => SpecialKey::Down,
            "end" => SpecialKey::End,
            "enter" => SpecialKey::Enter,
            "esc" => SpecialKey::Esc,
            "f1" => SpecialKey::F1,
            "f2" => SpecialKey::F2,
            "f3" => SpecialKey::F3,
            "f4" => SpecialKey::F4,
            "f5" => SpecialKey::F5,
            "f6" => SpecialKey::F6,
            "f7" => SpecialKey::F7,
            "f8" => SpecialKey::F8,
            "f9" => SpecialKey::F9,
            "f10" => SpecialKey::F10,
            "f11" => SpecialKey::F11,
            "f12" => SpecialKey::F12,
            "f13" => SpecialKey::F13,
            "f14" => SpecialKey::F14,
            "f15" => SpecialKey::F15,
            "f16" => SpecialKey::F16,
            "f17" => SpecialKey::F17,
            "f18" => SpecialKey::F18,
            "f19" => SpecialKey::F19,
            "f20" => SpecialKey::F20,
            "home" => SpecialKey::Home,
            "insert" => SpecialKey::Insert,
            "left" => SpecialKey::Left,
            "media_next" => SpecialKey::MediaNext,
            "media_play_pause" => SpecialKey::MediaPlayPause,
            "media_previous" => SpecialKey::MediaPrevious,
            "media_volume_down" => SpecialKey::MediaVolumeDown,
            "media_volume_mute" => SpecialKey::MediaVolumeMute,
            "media_volume_up" => SpecialKey::MediaVolumeUp,
            "menu" => SpecialKey::Menu,
            "num_lock" => SpecialKey::NumLock,
            "page_down" => SpecialKey::PageDown,
            "page_up" => SpecialKey::PageUp,
            "pause" => SpecialKey::Pause,
            "print_screen" => SpecialKey::PrintScreen,
            "right" => SpecialKey::Right,
            "scroll_lock" => SpecialKey::ScrollLock,
            "shift" => SpecialKey::Shift,
            "shift_l" => SpecialKey::ShiftL,
            "shift_r" => SpecialKey::ShiftR,
            "space" => SpecialKey::Space,
            "tab" => SpecialKey::Tab,
            "up" => SpecialKey::Up,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecialKey {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecialKey::from_name(s).ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

/// Error returned when parsing a key name not present in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown special key name: {0:?}")]
pub struct UnknownKeyName(pub String);

impl Serialize for SpecialKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SpecialKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SpecialKey::from_name(&name)
            .ok_or_else(|| de::Error::custom(format_args!("unknown special key name: {name:?}")))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_round_trips_through_its_name() {
        for &key in SpecialKey::ALL {
            assert_eq!(SpecialKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_every_key_round_trips_through_serde() {
        for &key in SpecialKey::ALL {
            // Arrange / Act
            let json = serde_json::to_string(&key).unwrap();
            let back: SpecialKey = serde_json::from_str(&json).unwrap();

            // Assert – serde uses the same names as the hand-written table
            assert_eq!(json, format!("\"{}\"", key.name()));
            assert_eq!(back, key);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &key in SpecialKey::ALL {
            assert!(seen.insert(key.name()), "duplicate name {:?}", key.name());
        }
    }

    #[test]
    fn test_from_name_rejects_unknown_names() {
        assert_eq!(SpecialKey::from_name("warp_drive"), None);
        assert_eq!(SpecialKey::from_name(""), None);
        // Names are case-sensitive on the wire.
        assert_eq!(SpecialKey::from_name("F1"), None);
    }

    #[test]
    fn test_from_str_reports_the_offending_name() {
        let err = "warp_drive".parse::<SpecialKey>().unwrap_err();
        assert_eq!(err, UnknownKeyName("warp_drive".to_string()));
    }

    #[test]
    fn test_legacy_toggle_key_names_resolve() {
        // The default toggle keys of the previous implementation.
        assert_eq!(SpecialKey::from_name("f1"), Some(SpecialKey::F1));
        assert_eq!(SpecialKey::from_name("f2"), Some(SpecialKey::F2));
    }
}
