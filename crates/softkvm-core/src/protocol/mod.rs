//! Protocol module containing the event model, the JSON line codec, and the
//! streaming frame assembler.

pub mod assembler;
pub mod codec;
pub mod event;

pub use assembler::FrameAssembler;
pub use codec::{decode_frame, encode_event, CodecError, FRAME_DELIMITER};
pub use event::*;
