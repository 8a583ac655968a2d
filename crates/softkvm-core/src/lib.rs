//! # softkvm-core
//!
//! Shared library for SoftKVM containing the wire event model, the
//! newline-delimited JSON codec, the streaming frame assembler, and the
//! static named-key table.
//!
//! This crate is used by both the source and sink applications.
//! It has zero dependencies on OS APIs, UI frameworks, or network sockets.
//!
//! # Architecture overview
//!
//! SoftKVM is a software KVM switch for exactly two machines: the *source*
//! captures physical keyboard and mouse activity, and the *sink* replays it
//! as synthetic input. A hotkey on the source toggles whether input acts
//! locally or is forwarded to the sink.
//!
//! This crate (`softkvm-core`) is the shared foundation. It defines:
//!
//! - **`protocol`** – How bytes travel over the network. Each event is one
//!   compact JSON object terminated by a single `\n`; the frame assembler
//!   turns arbitrary socket chunks back into decoded events.
//!
//! - **`keymap`** – The stable enumeration of named (non-printable) keys
//!   shared by both endpoints. The wire format depends on these names, so
//!   they are maintained by hand rather than derived from whatever symbols
//!   a hook library happens to expose.

pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `softkvm_core::Event` instead of `softkvm_core::protocol::event::Event`.
pub use keymap::SpecialKey;
pub use protocol::assembler::FrameAssembler;
pub use protocol::codec::{decode_frame, encode_event, CodecError, FRAME_DELIMITER};
pub use protocol::event::{Event, KeyAction, KeyEvent, KeyIdentity, MouseButton, MouseEvent};
