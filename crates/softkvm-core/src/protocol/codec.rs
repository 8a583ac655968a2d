//! JSON line codec for encoding and decoding SoftKVM events.
//!
//! Wire format:
//! ```text
//! [compact JSON object][0x0A]
//! ```
//! One event per frame, frames delimited by a single `\n`. There is no
//! length prefix and no compression. JSON string escaping guarantees the
//! payload itself never contains an unescaped delimiter byte.

use thiserror::Error;

use crate::protocol::event::Event;

/// The frame delimiter byte. Exactly one terminates every frame.
pub const FRAME_DELIMITER: u8 = b'\n';

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The frame is not valid JSON, or does not match any known event shape.
    /// The frame is consumed regardless so the stream never desynchronizes.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encodes an event into a self-contained delimiter-terminated frame.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if JSON serialization fails, which for
/// this event model indicates a bug rather than a runtime condition.
pub fn encode_event(event: &Event) -> Result<Vec<u8>, CodecError> {
    let mut frame = serde_json::to_vec(event)?;
    frame.push(FRAME_DELIMITER);
    Ok(frame)
}

/// Decodes one frame (without its trailing delimiter) into an [`Event`].
///
/// Decoding is total: any byte sequence that does not parse as one of the
/// four event shapes yields a [`CodecError`] for the caller to report and
/// discard.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON or an unrecognized
/// event shape.
pub fn decode_frame(frame: &[u8]) -> Result<Event, CodecError> {
    Ok(serde_json::from_slice(frame)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
