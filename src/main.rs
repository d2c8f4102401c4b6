//! # Gamepad Viewer
//!
//! Samples a gamepad and prints its named control state as JSON lines.
//!
//! ```bash
//! gamepad-viewer [config.toml]
//! ```
//!
//! Logs go to stderr (filter with `RUST_LOG`); stdout carries one JSON object
//! per changed frame for the visualization to consume.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gamepad_viewer::config::Config;
use gamepad_viewer::input::evdev_pad::EvdevGamepad;
use gamepad_viewer::output::StateSink;
use gamepad_viewer::poller::Poller;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let (log_writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_writer(log_writer)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    info!("Gamepad Viewer v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).with_context(|| format!("loading config {}", path))?,
        None => Config::default(),
    };

    let layout = Arc::new(config.controller_layout()?);
    info!("Using {} layout", layout.target());

    let gamepad = EvdevGamepad::open(&config.input.device_path)?;

    let sink = StateSink::new(std::io::stdout().lock(), config.output.only_changes);
    let mut poller = Poller::new(gamepad, layout, sink);

    info!("Press Ctrl+C to exit");
    poller
        .run(config.input.poll_rate_hz, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down..."),
                Err(e) => {
                    // Without our handler SIGINT keeps its default action
                    warn!("Could not listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    Ok(())
}

/// Filter from `RUST_LOG` if it parses, otherwise `info`.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("info"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_log_filter_honors_rust_log() {
        let filter = log_filter(Some("debug".to_string())).to_string();
        assert!(filter.contains("debug"));
        assert!(!filter.contains("info"));

        let filter = log_filter(Some("gamepad_viewer=trace".to_string())).to_string();
        assert!(filter.contains("gamepad_viewer=trace"));
    }

    #[test]
    fn test_log_filter_falls_back_on_garbage() {
        let filter = log_filter(Some("gamepad_viewer=loud".to_string())).to_string();
        assert!(filter.contains("info"));
    }
}
