//! Network infrastructure for the source application.
//!
//! [`RemoteSender`] owns the single outbound connection slot and a
//! background dial loop that keeps it filled:
//!
//! - At most one live connection is held at any instant. A newly
//!   established connection replaces (and closes) whatever was held.
//! - `send` is best-effort: with no connection the event is silently
//!   dropped, and a write failure closes the connection and clears the
//!   slot so the dial loop reconnects. Failures never propagate to the
//!   input-capture path.
//! - The dial loop retries forever while the process runs, with a bounded
//!   per-attempt connect timeout and a fixed sleep between failures.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use softkvm_core::{encode_event, Event};
use tokio::{
    io::AsyncWriteExt,
    net::{tcp::OwnedWriteHalf, TcpStream},
    sync::Mutex,
    time,
};
use tracing::{debug, error, info, warn};

use crate::application::forward_input::EventTransmitter;

/// Configuration for the source's connection to the sink.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Address of the sink's TCP listener.
    pub sink_addr: SocketAddr,
    /// Upper bound on a single connect attempt.
    pub connect_timeout: Duration,
    /// Sleep between failed connect attempts.
    pub retry_interval: Duration,
    /// Sleep between slot checks while a connection is healthy.
    pub poll_interval: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            sink_addr: "127.0.0.1:5001".parse().unwrap(),
            connect_timeout: Duration::from_secs(5),
            retry_interval: Duration::from_secs(2),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Manages the single best-effort TCP connection from source to sink.
pub struct RemoteSender {
    config: SenderConfig,
    /// The connection slot. Held only across the slot check/swap and the
    /// buffered frame write; an await here suspends the task, it never
    /// blocks a thread.
    slot: Mutex<Option<OwnedWriteHalf>>,
}

impl RemoteSender {
    /// Creates a new (not yet connected) sender.
    pub fn new(config: SenderConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
        }
    }

    /// Spawns the background dial loop.
    ///
    /// The loop dials whenever the slot is empty and runs until `running`
    /// is cleared. It never gives up: transient connect failures are logged
    /// and retried indefinitely.
    pub fn start(self: Arc<Self>, running: Arc<AtomicBool>) {
        let this = self;
        tokio::spawn(async move {
            while running.load(Ordering::Relaxed) {
                let vacant = this.slot.lock().await.is_none();
                if vacant {
                    match time::timeout(
                        this.config.connect_timeout,
                        TcpStream::connect(this.config.sink_addr),
                    )
                    .await
                    {
                        Ok(Ok(stream)) => {
                            if let Err(e) = stream.set_nodelay(true) {
                                debug!("could not set TCP_NODELAY: {e}");
                            }
                            info!("connected to sink at {}", this.config.sink_addr);
                            let (read_half, write_half) = stream.into_split();
                            // The read half is unused: peer loss surfaces as
                            // the next write failure.
                            drop(read_half);
                            this.install(write_half).await;
                        }
                        Ok(Err(e)) => {
                            warn!(
                                "could not connect to sink at {}: {e}; retrying in {:?}",
                                this.config.sink_addr, this.config.retry_interval
                            );
                            time::sleep(this.config.retry_interval).await;
                            continue;
                        }
                        Err(_) => {
                            warn!(
                                "connect to sink at {} timed out after {:?}; retrying in {:?}",
                                this.config.sink_addr,
                                this.config.connect_timeout,
                                this.config.retry_interval
                            );
                            time::sleep(this.config.retry_interval).await;
                            continue;
                        }
                    }
                }
                time::sleep(this.config.poll_interval).await;
            }
        });
    }

    /// Places a new connection in the slot, closing any previous one.
    ///
    /// Most recent peer wins; the replaced socket is closed by dropping it
    /// inside the lock, so no send can ever use a stale connection.
    async fn install(&self, writer: OwnedWriteHalf) {
        let mut guard = self.slot.lock().await;
        if guard.replace(writer).is_some() {
            info!("replaced previous sink connection");
        }
    }

    /// Returns whether a connection is currently held.
    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Encodes and writes one event, best-effort.
    ///
    /// Returns immediately when no connection is held. On a write failure
    /// the connection is closed and the slot cleared so the dial loop can
    /// reconnect; the event is not retried.
    pub async fn send(&self, event: &Event) {
        let frame = match encode_event(event) {
            Ok(frame) => frame,
            Err(e) => {
                error!("failed to encode event: {e}");
                return;
            }
        };

        let mut guard = self.slot.lock().await;
        let Some(writer) = guard.as_mut() else {
            return;
        };
        if let Err(e) = writer.write_all(&frame).await {
            warn!("send failed, dropping connection: {e}");
            *guard = None;
        }
    }
}

#[async_trait]
impl EventTransmitter for RemoteSender {
    async fn send(&self, event: Event) {
        RemoteSender::send(self, &event).await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use softkvm_core::{KeyAction, KeyEvent, KeyIdentity};
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn sample_event() -> Event {
        Event::Key(KeyEvent {
            action: KeyAction::Down,
            key: KeyIdentity::Char('k'),
        })
    }

    #[test]
    fn test_sender_config_default_matches_legacy_constants() {
        // Arrange / Act
        let cfg = SenderConfig::default();

        // Assert
        assert_eq!(cfg.sink_addr.port(), 5001);
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        assert_eq!(cfg.retry_interval, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_send_without_connection_returns_immediately() {
        // Arrange
        let sender = RemoteSender::new(SenderConfig::default());

        // Act – must complete well within the timeout, dropping the event
        let result =
            time::timeout(Duration::from_millis(100), sender.send(&sample_event())).await;

        // Assert
        assert!(result.is_ok(), "send with an empty slot must not block");
        assert!(!sender.is_connected().await);
    }

    #[tokio::test]
    async fn test_send_writes_one_delimited_frame() {
        // Arrange – a real loopback listener standing in for the sink
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sender = RemoteSender::new(SenderConfig {
            sink_addr: addr,
            ..Default::default()
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let (mut accepted, _) = listener.accept().await.unwrap();
        let (_read, write) = stream.into_split();
        sender.install(write).await;

        // Act
        sender.send(&sample_event()).await;

        // Assert – exactly the encoded frame arrives
        let expected = encode_event(&sample_event()).unwrap();
        let mut buf = vec![0u8; expected.len()];
        accepted.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, expected);
        assert!(sender.is_connected().await);
    }

    #[tokio::test]
    async fn test_install_replaces_and_closes_previous_connection() {
        // Arrange – two connections to the same listener
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sender = RemoteSender::new(SenderConfig {
            sink_addr: addr,
            ..Default::default()
        });

        let first = TcpStream::connect(addr).await.unwrap();
        let (mut first_accepted, _) = listener.accept().await.unwrap();
        let (_r1, w1) = first.into_split();
        sender.install(w1).await;

        let second = TcpStream::connect(addr).await.unwrap();
        let (_second_accepted, _) = listener.accept().await.unwrap();
        let (_r2, w2) = second.into_split();

        // Act – most recent peer wins
        sender.install(w2).await;

        // Assert – the first connection was closed: its peer reads EOF
        let mut buf = [0u8; 1];
        let n = first_accepted.read(&mut buf).await.unwrap();
        assert_eq!(n, 0, "replaced connection must be closed");
        assert!(sender.is_connected().await);
    }

    #[tokio::test]
    async fn test_write_failure_clears_the_slot() {
        // Arrange – install a connection, then kill the peer
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sender = RemoteSender::new(SenderConfig {
            sink_addr: addr,
            ..Default::default()
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let (accepted, _) = listener.accept().await.unwrap();
        let (_read, write) = stream.into_split();
        sender.install(write).await;
        drop(accepted);

        // Act – keep sending; once the reset surfaces, the slot must clear.
        // The first write may still land in the socket buffer, so allow a
        // few attempts.
        let mut cleared = false;
        for _ in 0..50 {
            sender.send(&sample_event()).await;
            if !sender.is_connected().await {
                cleared = true;
                break;
            }
            time::sleep(Duration::from_millis(10)).await;
        }

        // Assert
        assert!(cleared, "write failure must clear the connection slot");
    }

    #[tokio::test]
    async fn test_dial_loop_fills_the_slot_in_the_background() {
        // Arrange
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sender = Arc::new(RemoteSender::new(SenderConfig {
            sink_addr: addr,
            poll_interval: Duration::from_millis(10),
            retry_interval: Duration::from_millis(10),
            ..Default::default()
        }));
        let running = Arc::new(AtomicBool::new(true));

        // Act
        Arc::clone(&sender).start(Arc::clone(&running));
        let (_accepted, _) = listener.accept().await.unwrap();

        // Assert – the slot fills shortly after the accept
        let mut connected = false;
        for _ in 0..100 {
            if sender.is_connected().await {
                connected = true;
                break;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        assert!(connected, "dial loop must establish the connection");

        running.store(false, Ordering::Relaxed);
    }
}
