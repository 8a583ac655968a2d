//! SoftKVM Sink application entry point.
//!
//! Binds the TCP listener, wires the event applier to a platform
//! synthesizer, and serves source connections until shutdown.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ ApplyInputUseCase::new()    -- event -> synthesis mapping
//!  └─ EventListener::bind()       -- startup-fatal on bad address
//!  └─ EventListener::run()        -- accept/serve loop, forever
//! ```

use std::net::IpAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use softkvm_sink::application::apply_input::ApplyInputUseCase;
use softkvm_sink::infrastructure::network::{EventListener, ListenerConfig};
use softkvm_sink::infrastructure::synthesis::{noop::NoopSynthesizer, InputSynthesizer};

#[derive(Parser, Debug)]
#[command(
    name = "softkvm-sink",
    about = "SoftKVM sink: receive forwarded events and replay them as input"
)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "SOFTKVM_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// TCP port to listen on.
    #[arg(long, env = "SOFTKVM_PORT", default_value_t = 5001)]
    port: u16,
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

    info!("SoftKVM Sink starting");

    // ── Platform synthesizer ──────────────────────────────────────────────────
    // In production: replace NoopSynthesizer with the platform backend
    // (SendInput on Windows, XTest on Linux, CGEvent on macOS).
    let synthesizer = Arc::new(NoopSynthesizer::new());
    let applier = Arc::new(ApplyInputUseCase::new(
        synthesizer as Arc<dyn InputSynthesizer>,
    ));

    // ── Listener ──────────────────────────────────────────────────────────────
    let config = ListenerConfig {
        bind_addr: (args.bind, args.port).into(),
        ..Default::default()
    };
    let listener = EventListener::bind(config, applier).await?;

    info!("SoftKVM Sink ready. Press Ctrl-C to exit.");

    // Serve until the shutdown signal arrives; the accept loop itself never
    // exits on its own.
    let running = Arc::new(AtomicBool::new(true));
    tokio::select! {
        _ = listener.run(Arc::clone(&running)) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            running.store(false, Ordering::Relaxed);
        }
    }

    info!("SoftKVM Sink stopped");
    Ok(())
}
