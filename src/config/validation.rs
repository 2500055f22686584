//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the locale settings build a catalog (default inside allow-list)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::locale::{CatalogError, Locale, LocaleCatalog};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("locales: {0}")]
    Locales(#[from] CatalogError),

    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("content.upstream: '{0}' is not a valid host:port")]
    InvalidUpstream(String),

    #[error("content.base_url: '{0}' must start with '/'")]
    InvalidBaseUrl(String),

    #[error("content.homepage_links: '{0}' is not a canonical locale")]
    InvalidHomepageLocale(String),

    #[error("homepage link for '{0}' must not be empty")]
    EmptyHomepageLink(String),

    #[error("preferences.cookie_name: '{0}' is not a valid cookie name")]
    InvalidCookieName(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("admin.api_key must be changed when the admin API is enabled")]
    PlaceholderAdminKey,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = LocaleCatalog::from_config(&config.locales) {
        errors.push(e.into());
    }
    if config.locales.use_dash_locale && !config.locales.use_locale_url {
        tracing::warn!("locales.use_dash_locale has no effect without locales.use_locale_url");
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }
    if config.admin.enabled {
        check_address("admin.bind_address", &config.admin.bind_address, &mut errors);
        if config.admin.api_key.is_empty() || config.admin.api_key == "CHANGE_ME_IN_PRODUCTION" {
            errors.push(ValidationError::PlaceholderAdminKey);
        }
    }

    let content = &config.content;
    if !content.base_url.starts_with('/') {
        errors.push(ValidationError::InvalidBaseUrl(content.base_url.clone()));
    }
    if let Some(upstream) = &content.upstream {
        if Authority::from_str(upstream).is_err() {
            errors.push(ValidationError::InvalidUpstream(upstream.clone()));
        }
    }
    if content.default_homepage_link.trim_matches('/').is_empty() {
        errors.push(ValidationError::EmptyHomepageLink("default".to_string()));
    }
    for (locale, link) in &content.homepage_links {
        if !Locale::new(locale.as_str()).is_canonical() {
            errors.push(ValidationError::InvalidHomepageLocale(locale.clone()));
        }
        if link.trim_matches('/').is_empty() {
            errors.push(ValidationError::EmptyHomepageLink(locale.clone()));
        }
    }

    let cookie_name = &config.preferences.cookie_name;
    if cookie_name.is_empty()
        || !cookie_name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        errors.push(ValidationError::InvalidCookieName(cookie_name.clone()));
    }
    if config.preferences.max_age_days <= 0 {
        errors.push(ValidationError::ZeroValue("preferences.max_age_days"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.connect_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
