//! Multilingual root-URL locale router.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ routing::RootRouter ──▶ RoutingDecision
//!                        │   ▲               │
//!                        │   │               ▼
//!                        │   │          locale (catalog, segment, negotiate)
//!                        │   │
//!                        ▼   │
//!     Client Response ◀── response (301 / 302 / 404 / content) ◀── content upstream
//!
//!     config watcher ─┐
//!     SIGHUP ─────────┼─▶ update channel ──▶ snapshot swap (ArcSwap)
//!     admin /reload ──┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use locale_router::admin::setup_admin_router;
use locale_router::config::{load_config, watcher::ConfigWatcher, RouterConfig};
use locale_router::http::HttpServer;
use locale_router::lifecycle::{spawn_signal_handler, Shutdown};
use locale_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-router")]
#[command(about = "Language-prefix router for multilingual sites", long_about = None)]
struct Args {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "locale-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        style = %config.locales.style(),
        default_locale = %config.locales.default_locale,
        allowed = config.locales.allowed_locales.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();

    // Every reload trigger shares one update channel.
    let mut _file_watch = None;
    let (updates_tx, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            let tx = watcher.sender();
            _file_watch = Some(watcher.run()?);
            (tx, rx)
        }
        None => mpsc::unbounded_channel(),
    };

    let server = HttpServer::with_config_path(config.clone(), args.config.clone())?;
    spawn_signal_handler(shutdown.clone(), args.config.clone(), updates_tx)?;

    if config.admin.enabled {
        let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
        tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
        let admin_router = setup_admin_router(server.state());
        let admin_shutdown = shutdown.clone();
        tokio::spawn(async move {
            let result = axum::serve(admin_listener, admin_router)
                .with_graceful_shutdown(async move { admin_shutdown.triggered().await })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "Admin server failed");
            }
        });
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
