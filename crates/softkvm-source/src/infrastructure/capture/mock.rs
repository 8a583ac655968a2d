//! Mock input source for unit testing.
//!
//! Allows tests to inject synthetic [`RawInputEvent`]s without an OS hook
//! and to observe the suppression state the switch logic applies.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};

use crate::application::forward_input::SuppressionController;

use super::{CaptureError, InputSource, RawInputEvent};

/// A mock implementation of [`InputSource`] driven by the test.
#[derive(Default)]
pub struct MockInputSource {
    sender: Mutex<Option<Sender<RawInputEvent>>>,
    suppressed: Arc<AtomicBool>,
    suppress_calls: Mutex<Vec<bool>>,
}

impl MockInputSource {
    /// Creates a new mock input source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic event, as if captured from hardware.
    ///
    /// Panics if `start()` has not been called or `stop()` has been called.
    pub fn inject_event(&self, event: RawInputEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        match &*guard {
            Some(sender) => sender
                .send(event)
                .expect("receiver has been dropped; call start() first"),
            None => panic!("MockInputSource::inject_event called before start()"),
        }
    }

    /// Returns the current suppression state.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Returns every suppression change in call order.
    pub fn suppress_calls(&self) -> Vec<bool> {
        self.suppress_calls.lock().expect("lock poisoned").clone()
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel();
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel.
        *self.sender.lock().expect("lock poisoned") = None;
    }

    fn set_suppressed(&self, suppressed: bool) {
        self.suppressed.store(suppressed, Ordering::Relaxed);
        self.suppress_calls
            .lock()
            .expect("lock poisoned")
            .push(suppressed);
    }
}

impl SuppressionController for MockInputSource {
    fn set_suppressed(&self, suppressed: bool) {
        InputSource::set_suppressed(self, suppressed);
    }
}
