//! No-op input source for headless operation.
//!
//! Used when no OS hook backend is wired in: the channel stays open but
//! never carries an event, so the forwarding loop simply idles.

use std::sync::{mpsc, Mutex};

use tracing::debug;

use crate::application::forward_input::SuppressionController;

use super::{CaptureError, InputSource, RawInputEvent};

/// An [`InputSource`] that produces no events.
#[derive(Default)]
pub struct NoopInputSource {
    // Kept alive so the receiver never disconnects while running.
    sender: Mutex<Option<mpsc::Sender<RawInputEvent>>>,
}

impl NoopInputSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for NoopInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel();
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        *self.sender.lock().expect("lock poisoned") = None;
    }

    fn set_suppressed(&self, suppressed: bool) {
        debug!("noop capture backend: suppression set to {suppressed}");
    }
}

impl SuppressionController for NoopInputSource {
    fn set_suppressed(&self, suppressed: bool) {
        InputSource::set_suppressed(self, suppressed);
    }
}
