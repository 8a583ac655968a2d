//! Application layer for the source: pure decision logic, driven by raw
//! notifications and injected infrastructure traits.

pub mod forward_input;
pub mod motion;

pub use forward_input::{EventTransmitter, ForwardInputUseCase, SuppressionController, SwitchMode, ToggleKeys};
pub use motion::MotionDeltaTracker;
