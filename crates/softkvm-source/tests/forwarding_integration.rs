//! Integration tests for the source: switch state machine + connection
//! manager driving a real loopback TCP connection.
//!
//! A `TcpListener` on 127.0.0.1 stands in for the sink. Raw notifications
//! are pushed through the `ForwardInputUseCase` and the bytes arriving at
//! the listener are decoded and compared against the expected wire events.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use softkvm_core::{Event, KeyAction, KeyEvent, KeyIdentity, MouseButton, MouseEvent, SpecialKey};
use softkvm_source::application::forward_input::{
    EventTransmitter, ForwardInputUseCase, SuppressionController, SwitchMode, ToggleKeys,
};
use softkvm_source::infrastructure::capture::{mock::MockInputSource, RawInputEvent};
use softkvm_source::infrastructure::network::{RemoteSender, SenderConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Starts a sender dialing a fresh loopback listener and waits for the
/// connection to establish. Returns the accepted sink-side stream.
async fn connected_sender(running: &Arc<AtomicBool>) -> (Arc<RemoteSender>, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let sender = Arc::new(RemoteSender::new(SenderConfig {
        sink_addr: addr,
        connect_timeout: Duration::from_secs(1),
        retry_interval: Duration::from_millis(10),
        poll_interval: Duration::from_millis(10),
    }));
    Arc::clone(&sender).start(Arc::clone(running));

    let (accepted, _) = listener.accept().await.unwrap();
    for _ in 0..200 {
        if sender.is_connected().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(sender.is_connected().await, "sender must connect to the listener");

    (sender, accepted)
}

/// Reads `count` frames from the sink side of the connection.
async fn read_events(stream: &mut BufReader<TcpStream>, count: usize) -> Vec<Event> {
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        let mut line = String::new();
        let read = tokio::time::timeout(Duration::from_secs(5), stream.read_line(&mut line))
            .await
            .expect("timed out waiting for a frame")
            .expect("read must succeed");
        assert!(read > 0, "connection closed before all frames arrived");
        events.push(
            softkvm_core::decode_frame(line.trim_end().as_bytes()).expect("frame must decode"),
        );
    }
    events
}

#[tokio::test]
async fn test_remote_session_forwards_events_in_order_over_tcp() {
    // Arrange
    let running = Arc::new(AtomicBool::new(true));
    let (sender, accepted) = connected_sender(&running).await;
    let capture = Arc::new(MockInputSource::new());
    let mut use_case = ForwardInputUseCase::new(
        ToggleKeys::default(),
        Arc::clone(&sender) as Arc<dyn EventTransmitter>,
        Arc::clone(&capture) as Arc<dyn SuppressionController>,
    );
    let mut reader = BufReader::new(accepted);

    // Act – toggle to remote, then type, move, click, and scroll
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Special(SpecialKey::F2),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Char('h'),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyUp {
            key: KeyIdentity::Char('h'),
        })
        .await;
    use_case.handle_event(RawInputEvent::PointerMove { x: 100, y: 100 }).await;
    use_case.handle_event(RawInputEvent::PointerMove { x: 104, y: 98 }).await;
    use_case
        .handle_event(RawInputEvent::ButtonDown {
            button: MouseButton::Left,
        })
        .await;
    use_case.handle_event(RawInputEvent::Scroll { dx: 0, dy: -2 }).await;

    // Assert – exactly the expected frames, in send order
    let events = read_events(&mut reader, 5).await;
    assert_eq!(
        events,
        vec![
            Event::Key(KeyEvent {
                action: KeyAction::Down,
                key: KeyIdentity::Char('h'),
            }),
            Event::Key(KeyEvent {
                action: KeyAction::Up,
                key: KeyIdentity::Char('h'),
            }),
            Event::Mouse(MouseEvent::Move { dx: 4, dy: -2 }),
            Event::Mouse(MouseEvent::Click {
                button: MouseButton::Left,
                action: KeyAction::Down,
            }),
            Event::Mouse(MouseEvent::Scroll { dx: 0, dy: -2 }),
        ]
    );
    // The switch also applied OS-level suppression when going remote.
    assert!(capture.is_suppressed());

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_local_input_never_reaches_the_wire() {
    // Arrange
    let running = Arc::new(AtomicBool::new(true));
    let (sender, accepted) = connected_sender(&running).await;
    let capture = Arc::new(MockInputSource::new());
    let mut use_case = ForwardInputUseCase::new(
        ToggleKeys::default(),
        Arc::clone(&sender) as Arc<dyn EventTransmitter>,
        Arc::clone(&capture) as Arc<dyn SuppressionController>,
    );
    let mut reader = BufReader::new(accepted);

    // Act – type while local, go remote, type again, back to local, type more
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Char('b'),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Special(SpecialKey::F2),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Char('c'),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Special(SpecialKey::F1),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Char('d'),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Special(SpecialKey::F2),
        })
        .await;
    use_case
        .handle_event(RawInputEvent::KeyDown {
            key: KeyIdentity::Char('e'),
        })
        .await;

    // Assert – only the remote-mode keys arrive; 'b' and 'd' were consumed
    // locally and the toggles were swallowed
    let events = read_events(&mut reader, 2).await;
    assert_eq!(
        events,
        vec![
            Event::Key(KeyEvent {
                action: KeyAction::Down,
                key: KeyIdentity::Char('c'),
            }),
            Event::Key(KeyEvent {
                action: KeyAction::Down,
                key: KeyIdentity::Char('e'),
            }),
        ]
    );
    assert_eq!(use_case.mode(), SwitchMode::Remote);
    assert_eq!(capture.suppress_calls(), vec![true, false, true]);

    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_forwarding_without_a_connection_drops_events_quietly() {
    // Arrange – a sender that was never started and has no connection
    let sender = Arc::new(RemoteSender::new(SenderConfig::default()));
    let capture = Arc::new(MockInputSource::new());
    let mut use_case = ForwardInputUseCase::new(
        ToggleKeys::default(),
        Arc::clone(&sender) as Arc<dyn EventTransmitter>,
        Arc::clone(&capture) as Arc<dyn SuppressionController>,
    );

    // Act – the whole remote session must complete promptly with no peer
    let drive = async {
        use_case
            .handle_event(RawInputEvent::KeyDown {
                key: KeyIdentity::Special(SpecialKey::F2),
            })
            .await;
        for _ in 0..100 {
            use_case
                .handle_event(RawInputEvent::KeyDown {
                    key: KeyIdentity::Char('z'),
                })
                .await;
        }
    };
    tokio::time::timeout(Duration::from_secs(1), drive)
        .await
        .expect("sends with no connection must not block");

    // Assert
    assert!(!sender.is_connected().await);
}
