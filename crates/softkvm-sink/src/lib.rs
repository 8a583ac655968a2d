//! softkvm-sink library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does softkvm-sink do?
//!
//! The *sink* is the machine being controlled. It listens for a TCP
//! connection from the source, decodes the newline-delimited JSON event
//! stream, and replays each event as synthetic input through a platform
//! synthesizer. One peer is served at a time; when it disconnects the
//! listener simply waits for the next one, forever.

/// Application layer: mapping decoded events to synthesis calls.
pub mod application;

/// Infrastructure layer: the TCP listener and the synthesis seam.
pub mod infrastructure;
