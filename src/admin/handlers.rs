use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::{AppState, DecisionSummary, StateError};
use crate::locale::{render_segment, Locale};
use crate::routing::{
    ContentStore, MemoryPreferences, PreferenceStore, RequestContext, RequestParts,
    RoutingDecision,
};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub style: String,
    pub default_locale: Locale,
    pub content_ready: bool,
    pub upstream: Option<String>,
    pub decisions: DecisionSummary,
}

#[derive(Serialize)]
pub struct LocaleEntry {
    pub locale: Locale,
    pub segment: String,
    pub homepage_link: String,
    pub is_default: bool,
}

#[derive(Serialize)]
pub struct LocaleListing {
    pub style: String,
    pub default_locale: Locale,
    pub locales: Vec<LocaleEntry>,
}

/// Query for a decision dry-run. `cookie` is the stored preference value.
#[derive(Debug, Default, Deserialize)]
pub struct DecideQuery {
    #[serde(default)]
    pub path: String,
    pub accept_language: Option<String>,
    pub cookie: Option<String>,
}

#[derive(Serialize)]
pub struct DecideResult {
    #[serde(flatten)]
    pub decision: RoutingDecision,
    pub status: u16,
    pub current_locale: Option<Locale>,
    pub preference: Option<String>,
    pub preference_cleared: bool,
}

#[derive(Serialize)]
pub struct ReloadResult {
    pub reloaded: bool,
    pub error: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let inner = state.inner.load_full();
    let catalog = inner.router.catalog();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        style: catalog.style().to_string(),
        default_locale: catalog.default_locale().clone(),
        content_ready: inner.content.is_ready(),
        upstream: inner.upstream.as_ref().map(|u| u.authority().to_string()),
        decisions: state.counters.summary(),
    })
}

pub async fn get_locales(State(state): State<AppState>) -> Json<LocaleListing> {
    let inner = state.inner.load_full();
    let catalog = inner.router.catalog();

    let locales = catalog
        .allowed()
        .iter()
        .map(|locale| LocaleEntry {
            locale: locale.clone(),
            segment: render_segment(locale, catalog.style()),
            homepage_link: inner.content.homepage_link(locale),
            is_default: locale == catalog.default_locale(),
        })
        .collect();

    Json(LocaleListing {
        style: catalog.style().to_string(),
        default_locale: catalog.default_locale().clone(),
        locales,
    })
}

/// Run the routing decision for a described request without touching any cookie.
pub async fn get_decide(
    State(state): State<AppState>,
    Query(query): Query<DecideQuery>,
) -> Json<DecideResult> {
    let inner = state.inner.load_full();

    let trimmed = query.path.trim_start_matches('/');
    let (segment, rest) = match trimmed.split_once('/') {
        Some((segment, rest)) => (segment, rest.trim_matches('/')),
        None => (trimmed, ""),
    };

    let request = RequestParts {
        segment: (!segment.is_empty()).then(|| segment.to_string()),
        accept_language: query.accept_language.clone(),
        url: Some(format!("/{}", trimmed)),
    };
    let mut prefs = MemoryPreferences::new(query.cookie.clone());
    let mut ctx = RequestContext::new();

    let decision = if rest.is_empty() {
        inner.router.decide(&request, &mut ctx, &mut prefs, &inner.content)
    } else {
        inner.router.decide_page(&request, rest, &mut ctx, &inner.content)
    };

    Json(DecideResult {
        status: decision.status().as_u16(),
        decision,
        current_locale: ctx.current_locale,
        preference: prefs.get(),
        preference_cleared: prefs.was_cleared(),
    })
}

/// Re-read the config file and swap it in.
pub async fn post_reload(State(state): State<AppState>) -> (StatusCode, Json<ReloadResult>) {
    match state.reload_from_disk() {
        Ok(()) => (
            StatusCode::OK,
            Json(ReloadResult {
                reloaded: true,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Admin reload failed, keeping current configuration");
            let status = if matches!(e, StateError::NoConfigPath) {
                StatusCode::CONFLICT
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            (
                status,
                Json(ReloadResult {
                    reloaded: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
