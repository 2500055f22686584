//! Cookie-backed language preference.
//!
//! # Design Decisions
//! - Reads the incoming `Cookie` header once, at construction
//! - Writes are buffered as a single pending change and emitted as one
//!   `Set-Cookie` header on the response
//! - A later write wins: clearing a stale value and then storing a new one
//!   yields only the new value
//! - Storing the current value again is still emitted, refreshing the expiry

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{time::Duration, Cookie, SameSite};

use crate::config::PreferenceConfig;
use crate::routing::PreferenceStore;

/// A write the response must carry back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceChange {
    Set(String),
    Clear,
}

/// Per-request view of the preference cookie.
#[derive(Debug, Clone)]
pub struct CookiePreferences {
    name: String,
    path: String,
    max_age_days: i64,
    current: Option<String>,
    change: Option<PreferenceChange>,
}

impl CookiePreferences {
    pub fn from_headers(headers: &HeaderMap, config: &PreferenceConfig) -> Self {
        let current = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|raw| Cookie::split_parse(raw.to_string()))
            .filter_map(Result::ok)
            .find(|c| c.name() == config.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty());

        Self {
            name: config.cookie_name.clone(),
            path: config.cookie_path.clone(),
            max_age_days: config.max_age_days,
            current,
            change: None,
        }
    }

    pub fn pending_change(&self) -> Option<&PreferenceChange> {
        self.change.as_ref()
    }

    /// `Set-Cookie` value for the pending change, if any.
    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        let cookie = match self.change.as_ref()? {
            PreferenceChange::Set(value) => Cookie::build((self.name.clone(), value.clone()))
                .path(self.path.clone())
                .max_age(Duration::days(self.max_age_days))
                .same_site(SameSite::Lax)
                .http_only(true)
                .build(),
            PreferenceChange::Clear => Cookie::build((self.name.clone(), String::new()))
                .path(self.path.clone())
                .max_age(Duration::ZERO)
                .build(),
        };
        HeaderValue::from_str(&cookie.to_string()).ok()
    }
}

impl PreferenceStore for CookiePreferences {
    fn get(&self) -> Option<String> {
        self.current.clone()
    }

    fn set(&mut self, language: &str) {
        self.current = Some(language.to_string());
        self.change = Some(PreferenceChange::Set(language.to_string()));
    }

    fn clear(&mut self) {
        self.current = None;
        self.change = Some(PreferenceChange::Clear);
    }
}
