//! Interfaces to the systems the router consults but does not own.
//!
//! # Design Decisions
//! - Calls are synchronous and assumed cheap; retries belong to implementors
//! - The router only requests terminal actions from `HttpResponder`, it
//!   never writes bytes itself

use axum::http::StatusCode;

use crate::locale::Locale;

/// Durable per-client language preference (a cookie in the HTTP gateway).
pub trait PreferenceStore {
    /// The stored URL language string, if any.
    fn get(&self) -> Option<String>;

    fn set(&mut self, language: &str);

    fn clear(&mut self);
}

/// Backing content tree.
pub trait ContentStore {
    /// True once the store is initialized and queryable.
    fn is_ready(&self) -> bool;

    /// Relative link of the homepage node for `locale`. Opaque to the router.
    fn homepage_link(&self, locale: &Locale) -> String;
}

/// Raw inbound request data.
pub trait RequestSource {
    /// First path segment, or `None` for the site root.
    fn path_segment(&self) -> Option<&str>;

    fn accept_language_header(&self) -> Option<&str>;

    /// Original request URL, passed along on bootstrap redirects.
    fn original_url(&self) -> Option<&str> {
        None
    }
}

/// Emits the response for a decision.
pub trait HttpResponder {
    type Response;

    fn redirect(self, path: &str, status: StatusCode) -> Self::Response;

    fn not_found(self, status: StatusCode, message: &str) -> Self::Response;

    fn ok(self, locale: &Locale, canonical_path_prefix: &str) -> Self::Response;
}

/// In-memory preference store.
///
/// Used for dry-run decisions and as a test double.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    value: Option<String>,
    cleared: bool,
}

impl MemoryPreferences {
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            cleared: false,
        }
    }

    /// Whether `clear` was called at any point.
    pub fn was_cleared(&self) -> bool {
        self.cleared
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, language: &str) {
        self.value = Some(language.to_string());
    }

    fn clear(&mut self) {
        self.value = None;
        self.cleared = true;
    }
}

/// A request described by its parts rather than an HTTP message.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub segment: Option<String>,
    pub accept_language: Option<String>,
    pub url: Option<String>,
}

impl RequestSource for RequestParts {
    fn path_segment(&self) -> Option<&str> {
        self.segment.as_deref()
    }

    fn accept_language_header(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    fn original_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
