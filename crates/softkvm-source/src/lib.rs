//! softkvm-source library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does softkvm-source do?
//!
//! The *source* is the machine whose physical keyboard and mouse are shared.
//! It observes raw input notifications from an OS hook collaborator,
//! decides per notification whether input stays local or is forwarded
//! (the operator toggles this with the configured hotkeys), converts
//! absolute pointer positions into relative deltas, and pushes encoded
//! events to the sink over a single best-effort TCP connection that
//! reconnects in the background.

/// Application layer: the switch state machine and motion delta tracker.
pub mod application;

/// Infrastructure layer: network, input capture seam, and configuration.
pub mod infrastructure;
