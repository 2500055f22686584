//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the root and language-prefix handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hold the reloadable state snapshot
//! - Run the routing decision per request and emit its response
//! - Forward served content to the upstream, when configured

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{load_config, ConfigError, RouterConfig};
use crate::content::{StaticContentStore, UpstreamClient, UpstreamError};
use crate::http::cookies::CookiePreferences;
use crate::http::request::{request_id, InboundRequest, MakeRequestUuidV4};
use crate::http::response::{apply_preference, decorate_content, AxumResponder};
use crate::locale::CatalogError;
use crate::observability::metrics;
use crate::routing::{RequestContext, RootRouter, RoutingDecision};

/// Errors building a state snapshot from configuration.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("locale settings rejected: {0}")]
    Catalog(#[from] CatalogError),

    #[error("upstream rejected: {0}")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no config file to reload from")]
    NoConfigPath,
}

/// Everything a request needs, swapped wholesale on reload.
pub struct InnerState {
    pub config: RouterConfig,
    pub router: RootRouter,
    pub content: StaticContentStore,
    pub upstream: Option<UpstreamClient>,
}

impl InnerState {
    pub fn from_config(config: RouterConfig) -> Result<Self, StateError> {
        let router = RootRouter::from_config(&config)?;
        let content = StaticContentStore::from_config(&config.content);
        let upstream = match &config.content.upstream {
            Some(address) => Some(UpstreamClient::new(
                address,
                Duration::from_secs(config.timeouts.connect_secs),
            )?),
            None => None,
        };

        Ok(Self {
            config,
            router,
            content,
            upstream,
        })
    }
}

/// Decision counters since process start. Survive reloads.
#[derive(Debug, Default)]
pub struct DecisionCounters {
    serve_content: AtomicU64,
    redirect: AtomicU64,
    not_found: AtomicU64,
    bootstrap_redirect: AtomicU64,
    reloads: AtomicU64,
}

/// Snapshot of `DecisionCounters`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DecisionSummary {
    pub serve_content: u64,
    pub redirect: u64,
    pub not_found: u64,
    pub bootstrap_redirect: u64,
    pub reloads: u64,
}

impl DecisionCounters {
    fn record(&self, decision: &RoutingDecision) {
        let counter = match decision {
            RoutingDecision::ServeContent { .. } => &self.serve_content,
            RoutingDecision::Redirect { .. } => &self.redirect,
            RoutingDecision::NotFound => &self.not_found,
            RoutingDecision::BootstrapRedirect { .. } => &self.bootstrap_redirect,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> DecisionSummary {
        DecisionSummary {
            serve_content: self.serve_content.load(Ordering::Relaxed),
            redirect: self.redirect.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            bootstrap_redirect: self.bootstrap_redirect.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<InnerState>>,
    pub counters: Arc<DecisionCounters>,
    pub config_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: RouterConfig, config_path: Option<PathBuf>) -> Result<Self, StateError> {
        let inner = InnerState::from_config(config)?;
        Ok(Self {
            inner: Arc::new(ArcSwap::from_pointee(inner)),
            counters: Arc::new(DecisionCounters::default()),
            config_path,
        })
    }

    /// Replace the snapshot. On error the current snapshot stays in place.
    pub fn reload(&self, config: RouterConfig) -> Result<(), StateError> {
        let result = InnerState::from_config(config);
        metrics::record_reload(result.is_ok());
        let next = result?;

        let current = self.inner.load();
        for field in restart_required(&current.config, &next.config) {
            tracing::warn!(field, "Setting changed but only applies after a restart");
        }

        tracing::info!(
            style = %next.router.catalog().style(),
            default_locale = %next.router.catalog().default_locale(),
            allowed = next.router.catalog().allowed().len(),
            "Configuration reloaded"
        );
        self.inner.store(Arc::new(next));
        self.counters.reloads.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Reload from the config file the process was started with.
    pub fn reload_from_disk(&self) -> Result<(), StateError> {
        let path = self.config_path.as_ref().ok_or(StateError::NoConfigPath)?;
        let config = load_config(path).inspect_err(|_| metrics::record_reload(false))?;
        self.reload(config)
    }
}

/// Settings baked into the listener or the middleware stack at startup.
fn restart_required(current: &RouterConfig, next: &RouterConfig) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if current.listener.bind_address != next.listener.bind_address {
        fields.push("listener.bind_address");
    }
    if current.timeouts.request_secs != next.timeouts.request_secs {
        fields.push("timeouts.request_secs");
    }
    if current.admin.enabled != next.admin.enabled {
        fields.push("admin.enabled");
    }
    if current.admin.bind_address != next.admin.bind_address {
        fields.push("admin.bind_address");
    }
    if current.observability.metrics_enabled != next.observability.metrics_enabled
        || current.observability.metrics_address != next.observability.metrics_address
    {
        fields.push("observability.metrics");
    }
    if current.observability.log_level != next.observability.log_level
        || current.observability.json_logs != next.observability.json_logs
    {
        fields.push("observability.logging");
    }
    fields
}

/// HTTP server for the locale router.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, StateError> {
        Self::with_config_path(config, None)
    }

    /// Like `new`, remembering where the config came from for admin reloads.
    pub fn with_config_path(
        config: RouterConfig,
        config_path: Option<PathBuf>,
    ) -> Result<Self, StateError> {
        let request_secs = config.timeouts.request_secs;
        let state = AppState::new(config, config_path)?;
        let router = Self::build_router(request_secs, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(request_secs: u64, state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/{segment}", get(segment_handler))
            .route("/{segment}/", get(segment_handler))
            .route("/{segment}/{*rest}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// The axum router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs arriving on `config_updates` are applied as reloads; the
    /// server drains and stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = reload_state.reload(config) {
                    tracing::error!(error = %e, "Rejected configuration update, keeping current");
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn root_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    route_request(state, None, None, method, uri, headers).await
}

async fn segment_handler(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    route_request(state, Some(segment), None, method, uri, headers).await
}

async fn page_handler(
    State(state): State<AppState>,
    Path((segment, rest)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    route_request(state, Some(segment), Some(rest), method, uri, headers).await
}

/// Decide, then respond. `rest` is the page path below the language segment.
async fn route_request(
    state: AppState,
    segment: Option<String>,
    rest: Option<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let inner = state.inner.load_full();
    let request_id = request_id(&headers).to_string();

    let source = InboundRequest::new(segment.as_deref(), &uri, &headers);
    let mut prefs = CookiePreferences::from_headers(&headers, &inner.config.preferences);
    let mut ctx = RequestContext::new();

    let decision = match rest.as_deref() {
        None => inner.router.decide(&source, &mut ctx, &mut prefs, &inner.content),
        Some(rest) => inner.router.decide_page(&source, rest, &mut ctx, &inner.content),
    };

    metrics::record_decision(decision.kind(), start);
    state.counters.record(&decision);
    tracing::debug!(
        request_id = %request_id,
        path = %uri.path(),
        decision = decision.kind(),
        status = decision.status().as_u16(),
        locale = ?ctx.current_locale,
        "Routing decision"
    );

    let cookie = prefs.set_cookie_header();
    let response = match (&decision, &inner.upstream) {
        (
            RoutingDecision::ServeContent {
                locale,
                canonical_path_prefix,
            },
            Some(upstream),
        ) => match upstream
            .forward(&method, &headers, canonical_path_prefix, uri.query(), locale)
            .await
        {
            Ok(mut response) => {
                decorate_content(&mut response, locale);
                response
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, upstream = %upstream.authority(), error = %e, "Upstream error");
                metrics::record_upstream_error();
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        },
        _ => decision.respond(AxumResponder),
    };

    apply_preference(response, cookie)
}
