//! Root-URL routing state machine.
//!
//! # Responsibilities
//! - Validate the language segment of a request
//! - Detect a locale for segment-less requests (stored preference, then
//!   Accept-Language)
//! - Produce exactly one `RoutingDecision` per request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - All parse and validation failures end here as NotFound or Redirect
//! - Collaborators are passed per call so each request brings its own
//!   cookie jar and content snapshot

use tracing::debug;

use crate::config::RouterConfig;
use crate::locale::{
    negotiate, parse_segment, render_segment, CatalogError, Locale, LocaleCatalog,
};
use crate::routing::collaborators::{ContentStore, PreferenceStore, RequestSource};
use crate::routing::decision::{RequestContext, RoutingDecision};

/// Decides where a request to the site root (or a language prefix) goes.
#[derive(Debug, Clone)]
pub struct RootRouter {
    catalog: LocaleCatalog,
    base_url: String,
    bootstrap_path: String,
}

impl RootRouter {
    pub fn new(
        catalog: LocaleCatalog,
        base_url: impl Into<String>,
        bootstrap_path: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            base_url: base_url.into(),
            bootstrap_path: bootstrap_path.into(),
        }
    }

    /// Build a router from the locale and content sections of the config.
    pub fn from_config(config: &RouterConfig) -> Result<Self, CatalogError> {
        let catalog = LocaleCatalog::from_config(&config.locales)?;
        Ok(Self::new(
            catalog,
            config.content.base_url.clone(),
            config.content.bootstrap_path.clone(),
        ))
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Route a request that hit the site root handler.
    pub fn decide<Q, P, C>(
        &self,
        request: &Q,
        ctx: &mut RequestContext,
        prefs: &mut P,
        content: &C,
    ) -> RoutingDecision
    where
        Q: RequestSource + ?Sized,
        P: PreferenceStore + ?Sized,
        C: ContentStore + ?Sized,
    {
        ctx.is_at_root = true;

        match request.path_segment().filter(|s| !s.is_empty()) {
            Some(segment) => self.decide_with_segment(segment, request, ctx, prefs, content),
            None => self.decide_without_segment(request, prefs),
        }
    }

    /// Route a request for a page below a language prefix, e.g. `/fr/about/`.
    pub fn decide_page<Q, C>(
        &self,
        request: &Q,
        relative_link: &str,
        ctx: &mut RequestContext,
        content: &C,
    ) -> RoutingDecision
    where
        Q: RequestSource + ?Sized,
        C: ContentStore + ?Sized,
    {
        ctx.is_at_root = false;

        let Some(segment) = request.path_segment().filter(|s| !s.is_empty()) else {
            return RoutingDecision::NotFound;
        };
        let locale = match self.resolve_segment(segment) {
            Ok(locale) => locale,
            Err(decision) => return decision,
        };
        ctx.current_locale = Some(locale.clone());

        if !content.is_ready() {
            return self.bootstrap_redirect(request);
        }

        if self.should_be_on_root(relative_link, ctx, content) {
            debug!(segment, relative_link, "Homepage requested by link, redirecting to language root");
            return RoutingDecision::Redirect {
                target_path: self.join_links(segment),
            };
        }

        RoutingDecision::ServeContent {
            locale,
            canonical_path_prefix: format!("{}/{}/", segment, relative_link.trim_matches('/')),
        }
    }

    /// True if a page at `relative_link` is the homepage and should be
    /// served from the language root instead.
    ///
    /// Always false when the request already came in through the root.
    pub fn should_be_on_root<C>(&self, relative_link: &str, ctx: &RequestContext, content: &C) -> bool
    where
        C: ContentStore + ?Sized,
    {
        if ctx.is_at_root {
            return false;
        }
        let locale = ctx
            .current_locale
            .as_ref()
            .unwrap_or_else(|| self.catalog.default_locale());
        content.homepage_link(locale) == relative_link.trim_matches('/')
    }

    fn decide_with_segment<Q, P, C>(
        &self,
        segment: &str,
        request: &Q,
        ctx: &mut RequestContext,
        prefs: &mut P,
        content: &C,
    ) -> RoutingDecision
    where
        Q: RequestSource + ?Sized,
        P: PreferenceStore + ?Sized,
        C: ContentStore + ?Sized,
    {
        let locale = match self.resolve_segment(segment) {
            Ok(locale) => locale,
            Err(decision) => return decision,
        };

        prefs.set(segment);
        ctx.current_locale = Some(locale.clone());

        if !content.is_ready() {
            return self.bootstrap_redirect(request);
        }

        let homepage = content.homepage_link(&locale);
        RoutingDecision::ServeContent {
            locale,
            canonical_path_prefix: format!("{}/{}/", segment, homepage),
        }
    }

    fn decide_without_segment<Q, P>(&self, request: &Q, prefs: &mut P) -> RoutingDecision
    where
        Q: RequestSource + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        let style = self.catalog.style();

        let detected = self.stored_preference(prefs).or_else(|| {
            request
                .accept_language_header()
                .and_then(|header| negotiate(header, self.catalog.allowed()))
        });

        let language = match detected {
            Some(locale) => {
                let language = render_segment(&locale, style);
                prefs.set(&language);
                debug!(locale = %locale, language = %language, "Detected visitor locale");
                language
            }
            None => {
                debug!(default = %self.catalog.default_locale(), "No locale detected, using default");
                render_segment(self.catalog.default_locale(), style)
            }
        };

        RoutingDecision::Redirect {
            target_path: self.join_links(&language),
        }
    }

    /// Parse and allow-list a segment; the error side is the terminal decision.
    fn resolve_segment(&self, segment: &str) -> Result<Locale, RoutingDecision> {
        let style = self.catalog.style();

        let locale = parse_segment(segment, style, &self.catalog).map_err(|e| {
            debug!(segment, style = %style, error = %e, "Rejected language segment");
            RoutingDecision::NotFound
        })?;

        if !self.catalog.is_allowed(&locale) {
            debug!(segment, locale = %locale, "Locale not served, redirecting to default");
            let fallback = render_segment(self.catalog.default_locale(), style);
            return Err(RoutingDecision::Redirect {
                target_path: self.join_links(&fallback),
            });
        }

        Ok(locale)
    }

    /// A stored preference that is still valid under the current style.
    ///
    /// Stale values (style changed, locale no longer served) are cleared.
    fn stored_preference<P>(&self, prefs: &mut P) -> Option<Locale>
    where
        P: PreferenceStore + ?Sized,
    {
        let stored = prefs.get()?;
        let valid = parse_segment(&stored, self.catalog.style(), &self.catalog)
            .ok()
            .filter(|locale| self.catalog.is_allowed(locale));

        if valid.is_none() {
            debug!(stored = %stored, "Discarding stale language preference");
            prefs.clear();
        }
        valid
    }

    fn bootstrap_redirect<Q>(&self, request: &Q) -> RoutingDecision
    where
        Q: RequestSource + ?Sized,
    {
        let return_url = request.original_url().unwrap_or_default();
        RoutingDecision::BootstrapRedirect {
            target_path: format!(
                "{}/{}?returnURL={}",
                self.base_url.trim_end_matches('/'),
                self.bootstrap_path.trim_start_matches('/'),
                urlencoding::encode(return_url)
            ),
        }
    }

    fn join_links(&self, language: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), language)
    }
}
