//! Routing decision and per-request context.

use axum::http::StatusCode;
use serde::Serialize;

use crate::locale::Locale;
use crate::routing::collaborators::HttpResponder;

/// Body of every locale 404.
pub const NOT_FOUND_MESSAGE: &str = "The requested page could not be found.";

/// Outcome of routing one request. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Continue to content under the resolved locale.
    ServeContent {
        locale: Locale,
        canonical_path_prefix: String,
    },
    /// Permanent redirect to the canonical URL.
    Redirect { target_path: String },
    /// Malformed or unknown language segment.
    NotFound,
    /// Content store not initialized yet.
    BootstrapRedirect { target_path: String },
}

impl RoutingDecision {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ServeContent { .. } => StatusCode::OK,
            Self::Redirect { .. } => StatusCode::MOVED_PERMANENTLY,
            Self::NotFound => StatusCode::NOT_FOUND,
            // Temporary: stops applying once the store is ready
            Self::BootstrapRedirect { .. } => StatusCode::FOUND,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServeContent { .. } => "serve_content",
            Self::Redirect { .. } => "redirect",
            Self::NotFound => "not_found",
            Self::BootstrapRedirect { .. } => "bootstrap_redirect",
        }
    }

    /// Hand the decision to a responder.
    pub fn respond<R: HttpResponder>(&self, responder: R) -> R::Response {
        let status = self.status();
        match self {
            Self::ServeContent {
                locale,
                canonical_path_prefix,
            } => responder.ok(locale, canonical_path_prefix),
            Self::Redirect { target_path } | Self::BootstrapRedirect { target_path } => {
                responder.redirect(target_path, status)
            }
            Self::NotFound => responder.not_found(status, NOT_FOUND_MESSAGE),
        }
    }
}

/// Per-request state shared between the router and the content layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Locale activated for this request, once resolved.
    pub current_locale: Option<Locale>,
    /// Whether the request entered through the site root handler.
    pub is_at_root: bool,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }
}
