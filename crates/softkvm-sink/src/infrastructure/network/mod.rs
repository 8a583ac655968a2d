//! Network infrastructure for the sink application.
//!
//! [`EventListener`] owns the TCP listener and the serving loop:
//!
//! ```text
//! Idle → Listening → (accepted) Serving → Idle → ...
//! ```
//!
//! One connection is served at a time, inline in the accept loop, which
//! keeps the single-active-connection invariant structural. Each
//! connection gets its own [`FrameAssembler`], dropped with it, so a
//! half-received frame from a dead peer can never leak into the next
//! session. Accept and read failures are logged and the loop keeps
//! running; binding is the only fatal step.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use softkvm_core::FrameAssembler;
use thiserror::Error;
use tokio::{
    io::AsyncReadExt,
    net::{TcpListener, TcpStream},
};
use tracing::{info, warn};

use crate::application::apply_input::ApplyInputUseCase;

/// Error type for the sink network layer.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listener could not be bound. Startup-fatal.
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for the sink's TCP listener.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Address and port to listen on.
    pub bind_addr: SocketAddr,
    /// Size of the per-connection read buffer.
    pub read_buffer_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5001".parse().unwrap(),
            read_buffer_size: 4096,
        }
    }
}

/// Accepts source connections and replays their event streams.
pub struct EventListener {
    listener: TcpListener,
    applier: Arc<ApplyInputUseCase>,
    read_buffer_size: usize,
}

impl EventListener {
    /// Binds the listener.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Bind`] when the address cannot be bound;
    /// this aborts startup, nothing after it is fatal.
    pub async fn bind(
        config: ListenerConfig,
        applier: Arc<ApplyInputUseCase>,
    ) -> Result<Self, ListenerError> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: config.bind_addr,
                source,
            })?;
        info!("listening on {}", config.bind_addr);
        Ok(Self {
            listener,
            applier,
            read_buffer_size: config.read_buffer_size,
        })
    }

    /// Returns the bound local address (useful with port 0 in tests).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `running` is cleared.
    ///
    /// A fresh accept is always permitted after the current peer leaves; a
    /// failed accept is logged and never exits the loop.
    pub async fn run(&self, running: Arc<AtomicBool>) {
        while running.load(Ordering::Relaxed) {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!("peer connected: {peer}");
                    self.serve(stream).await;
                    info!("peer disconnected: {peer}");
                }
                Err(e) => {
                    warn!("accept failed: {e}");
                }
            }
        }
    }

    /// Serves one connection until EOF or a read error.
    async fn serve(&self, mut stream: TcpStream) {
        let mut assembler = FrameAssembler::new();
        let mut chunk = vec![0u8; self.read_buffer_size];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    for result in assembler.feed(&chunk[..n]) {
                        match result {
                            Ok(event) => {
                                if let Err(e) = self.applier.apply(&event) {
                                    warn!("dropping event: {e}");
                                }
                            }
                            // The frame was consumed; the stream stays in sync.
                            Err(e) => warn!("discarding malformed frame: {e}"),
                        }
                    }
                }
                Err(e) => {
                    warn!("read error, closing connection: {e}");
                    break;
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::synthesis::noop::NoopSynthesizer;
    use crate::infrastructure::synthesis::InputSynthesizer;

    fn make_applier() -> Arc<ApplyInputUseCase> {
        Arc::new(ApplyInputUseCase::new(
            Arc::new(NoopSynthesizer::new()) as Arc<dyn InputSynthesizer>
        ))
    }

    #[test]
    fn test_listener_config_default_matches_legacy_constants() {
        // Arrange / Act
        let cfg = ListenerConfig::default();

        // Assert
        assert_eq!(cfg.bind_addr.port(), 5001);
        assert_eq!(cfg.read_buffer_size, 4096);
    }

    #[tokio::test]
    async fn test_bind_on_ephemeral_port_reports_local_addr() {
        // Arrange
        let cfg = ListenerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            ..Default::default()
        };

        // Act
        let listener = EventListener::bind(cfg, make_applier())
            .await
            .expect("bind must succeed");

        // Assert
        let addr = listener.local_addr().expect("local addr");
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_on_unroutable_address_is_a_startup_error() {
        // Arrange – a TEST-NET-2 address this host does not own
        let cfg = ListenerConfig {
            bind_addr: "198.51.100.1:0".parse().unwrap(),
            ..Default::default()
        };

        // Act
        let result = EventListener::bind(cfg, make_applier()).await;

        // Assert
        assert!(matches!(result, Err(ListenerError::Bind { .. })));
    }
}
