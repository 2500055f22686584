//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate signals to internal events
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers config reload, not shutdown
//! - Non-unix targets only get Ctrl-C

use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{watcher::reload_into, RouterConfig};
use crate::lifecycle::Shutdown;

/// Spawn the signal task.
///
/// With a `config_path`, SIGHUP re-reads it and pushes the result to `updates`.
#[cfg(unix)]
pub fn spawn_signal_handler(
    shutdown: Shutdown,
    config_path: Option<PathBuf>,
    updates: mpsc::UnboundedSender<RouterConfig>,
) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let mut stop = shutdown.subscribe();

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = terminate.recv() => {
                    tracing::info!("SIGTERM received, shutting down");
                    shutdown.trigger();
                    break;
                }
                _ = interrupt.recv() => {
                    tracing::info!("SIGINT received, shutting down");
                    shutdown.trigger();
                    break;
                }
                _ = hangup.recv() => match &config_path {
                    Some(path) => {
                        tracing::info!(path = ?path, "SIGHUP received, reloading configuration");
                        reload_into(path, &updates);
                    }
                    None => tracing::warn!("SIGHUP received but no config file was given"),
                },
                _ = stop.recv() => break,
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_signal_handler(
    shutdown: Shutdown,
    _config_path: Option<PathBuf>,
    _updates: mpsc::UnboundedSender<RouterConfig>,
) -> std::io::Result<JoinHandle<()>> {
    let mut stop = shutdown.subscribe();
    Ok(tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                    return;
                }
                tracing::info!("Ctrl-C received, shutting down");
                shutdown.trigger();
            }
            _ = stop.recv() => {}
        }
    }))
}
