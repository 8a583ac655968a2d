//! SoftKVM Source application entry point.
//!
//! Wires together configuration, the background connection manager, the
//! capture backend, and the forwarding loop, then runs the Tokio async
//! runtime until shutdown.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + CLI overrides
//!  └─ RemoteSender::start()       -- background dial/reconnect loop
//!  └─ InputSource::start()        -- capture backend (hook thread)
//!  └─ capture pump                -- std channel -> tokio channel
//!  └─ ForwardInputUseCase loop    -- toggle handling + forwarding
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use softkvm_source::application::forward_input::{
    EventTransmitter, ForwardInputUseCase, SuppressionController,
};
use softkvm_source::infrastructure::capture::{noop::NoopInputSource, InputSource};
use softkvm_source::infrastructure::network::RemoteSender;
use softkvm_source::infrastructure::storage::config::load_config;

#[derive(Parser, Debug)]
#[command(
    name = "softkvm-source",
    about = "SoftKVM source: capture local input and forward it to the sink"
)]
struct Args {
    /// IP address of the sink machine (overrides the config file).
    #[arg(long, env = "SOFTKVM_SINK_HOST")]
    sink_host: Option<String>,

    /// TCP port of the sink (overrides the config file).
    #[arg(long, env = "SOFTKVM_SINK_PORT")]
    sink_port: Option<u16>,

    /// Path to the TOML configuration file.
    #[arg(long, default_value = "softkvm-source.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Configuration errors are the only failures allowed to abort startup;
    // everything after this point recovers and retries.
    let mut config = load_config(&args.config)?;
    if let Some(host) = args.sink_host {
        config.connection.sink_host = host;
    }
    if let Some(port) = args.sink_port {
        config.connection.sink_port = port;
    }
    let sender_config = config.sender_config()?;
    let toggles = config.toggle_keys();

    info!("SoftKVM Source starting; sink at {}", sender_config.sink_addr);

    // Shutdown flag shared across all background services.
    let running = Arc::new(AtomicBool::new(true));

    // ── Connection manager ────────────────────────────────────────────────────
    let sender = Arc::new(RemoteSender::new(sender_config));
    Arc::clone(&sender).start(Arc::clone(&running));

    // ── Input capture backend ─────────────────────────────────────────────────
    // In production: replace NoopInputSource with the platform hook backend
    // (low-level hooks on Windows, an event tap on macOS, an evdev or X11
    // grab on Linux).
    let capture = Arc::new(NoopInputSource::new());
    let raw_rx = capture.start()?;

    // ── Capture pump ──────────────────────────────────────────────────────────
    // Hook callbacks must never block, so events hop from the capture thread
    // into the async forwarding loop through a bounded channel.
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel(256);
    std::thread::spawn(move || {
        for event in raw_rx {
            if event_tx.blocking_send(event).is_err() {
                break;
            }
        }
    });

    // ── Forwarding loop ───────────────────────────────────────────────────────
    let mut use_case = ForwardInputUseCase::new(
        toggles,
        Arc::clone(&sender) as Arc<dyn EventTransmitter>,
        Arc::clone(&capture) as Arc<dyn SuppressionController>,
    );
    let forward_running = Arc::clone(&running);
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !forward_running.load(Ordering::Relaxed) {
                break;
            }
            use_case.handle_event(event).await;
        }
    });

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!(
        "SoftKVM Source ready. {} switches to local, {} to remote. Press Ctrl-C to exit.",
        toggles.to_local, toggles.to_remote
    );

    loop {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if !running.load(Ordering::Relaxed) {
            break;
        }
    }

    capture.stop();
    info!("SoftKVM Source stopped");
    Ok(())
}
