//! Application layer for the sink.

pub mod apply_input;

pub use apply_input::ApplyInputUseCase;
