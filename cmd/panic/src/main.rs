//! Program panic example
//!
//! Demonstrates the `main` → `main_e` pattern: every layer masks the error
//! it propagates, `main` hands the final error to `tracer::panic`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=trace` - Show a log line for every mask
//! - `PANIC_DEMO_PORT=<port>` - Port to "connect" to (default 7777, 0 succeeds)
//! - `TRACER_PANIC_INDENT`, `TRACER_PANIC_EXIT_CODE`, `TRACER_PANIC_HEADER`

use std::io;
use std::sync::{Arc, OnceLock};

use tracer::{maskf, Error, ErrorRef, ResultExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Sentinel for a rejected configuration. Compare with `tracer::is`.
fn invalid_config() -> &'static Arc<Error> {
    static ERR: OnceLock<Arc<Error>> = OnceLock::new();
    ERR.get_or_init(|| {
        Arc::new(
            Error::new()
                .with_kind("invalidConfig")
                .with_description("the demo configuration could not be used"),
        )
    })
}

// RUST_LOG=trace cargo run -p tracer-panic
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = main_e() {
        tracer::panic(err);
    }

    println!("connected");
}

fn main_e() -> tracer::Result<()> {
    let port = port()?;
    info!(port, "dialing");

    dial(port).mask()?;

    Ok(())
}

fn port() -> tracer::Result<u16> {
    let raw = std::env::var("PANIC_DEMO_PORT").unwrap_or_else(|_| "7777".to_string());
    match raw.parse::<u16>() {
        Ok(port) => Ok(port),
        Err(_) => Err(maskf!(invalid_config(), "PANIC_DEMO_PORT={raw:?} is not a port").into()),
    }
}

fn dial(port: u16) -> Result<(), ErrorRef> {
    debug!(port, "connecting");
    if port == 0 {
        return Ok(());
    }

    let err = io::Error::new(
        io::ErrorKind::ConnectionRefused,
        format!("dial tcp :{port}: connect: connection refused"),
    );
    Err::<(), _>(ErrorRef::new(err)).mask()
}
