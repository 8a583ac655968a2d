//! Streaming frame assembler.
//!
//! TCP delivers bytes in arbitrary chunks: one read may carry half a frame,
//! three frames, or three and a half. The [`FrameAssembler`] owns a single
//! growable accumulator per connection, yields every complete frame as soon
//! as its delimiter has arrived, and retains the trailing partial frame for
//! the next `feed` call. A frame that fails to decode is still consumed, so
//! one corrupt frame never desynchronizes the frames after it.

use crate::protocol::codec::{decode_frame, CodecError, FRAME_DELIMITER};
use crate::protocol::event::Event;

/// Reassembles delimiter-terminated frames from arbitrary byte chunks.
///
/// One assembler exists per connection and is dropped with it; buffered
/// bytes from a closed connection are never carried over.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: Vec<u8>,
}

impl FrameAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns an iterator draining every frame that is
    /// now complete.
    ///
    /// The iterator is lazy and finite: it stops at the first missing
    /// delimiter, leaving the remainder buffered. Dropping the iterator
    /// early leaves the undrained frames buffered for the next call.
    pub fn feed<'a>(&'a mut self, chunk: &[u8]) -> Frames<'a> {
        self.buf.extend_from_slice(chunk);
        Frames { assembler: self }
    }

    /// Number of bytes currently buffered (zero or more complete frames plus
    /// at most one partial frame).
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Draining iterator over the complete frames held by a [`FrameAssembler`].
pub struct Frames<'a> {
    assembler: &'a mut FrameAssembler,
}

impl Iterator for Frames<'_> {
    type Item = Result<Event, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        let buf = &mut self.assembler.buf;
        let pos = buf.iter().position(|&b| b == FRAME_DELIMITER)?;
        let result = decode_frame(&buf[..pos]);
        // Consume the frame and its delimiter even when decoding failed.
        buf.drain(..=pos);
        Some(result)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
