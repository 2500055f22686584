//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::UrlLanguageStyle;

/// Root configuration for the locale router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// URL style, allow-list and default locale.
    pub locales: LocaleConfig,

    /// Content store collaborator settings.
    pub content: ContentConfig,

    /// Stored-preference cookie settings.
    pub preferences: PreferenceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Carry the full locale in URLs (`/en_US/`) instead of the language (`/en/`).
    #[serde(alias = "UseLocaleURL")]
    pub use_locale_url: bool,

    /// Render the locale as lowercase dash form (`/en-us/`).
    /// Only meaningful together with `use_locale_url`.
    #[serde(alias = "UseDashLocale")]
    pub use_dash_locale: bool,

    /// Locale served when nothing else matches.
    pub default_locale: String,

    /// Locales the site serves. Order is the negotiation order.
    pub allowed_locales: Vec<String>,

    /// Explicit language → locale mappings (e.g. `pt = "pt_PT"`).
    pub lang_overrides: BTreeMap<String, String>,
}

impl LocaleConfig {
    pub fn style(&self) -> UrlLanguageStyle {
        UrlLanguageStyle::from_flags(self.use_locale_url, self.use_dash_locale)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            use_locale_url: false,
            use_dash_locale: false,
            default_locale: "en_US".to_string(),
            allowed_locales: vec!["en_US".to_string()],
            lang_overrides: BTreeMap::new(),
        }
    }
}

/// Content store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Whether the content store is initialized and queryable.
    pub ready: bool,

    /// Base URL every redirect target is joined onto.
    pub base_url: String,

    /// Path (relative to `base_url`) that initializes the content store.
    pub bootstrap_path: String,

    /// Homepage link used for locales without an explicit entry.
    pub default_homepage_link: String,

    /// Homepage link per locale (e.g. `fr_FR = "maison"`).
    pub homepage_links: BTreeMap<String, String>,

    /// Upstream content server address (e.g., "127.0.0.1:3000").
    /// When unset, served content is answered locally.
    pub upstream: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            ready: true,
            base_url: "/".to_string(),
            bootstrap_path: "dev/build".to_string(),
            default_homepage_link: "home".to_string(),
            homepage_links: BTreeMap::new(),
            upstream: None,
        }
    }
}

/// Stored-preference cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreferenceConfig {
    /// Cookie carrying the visitor's language.
    pub cookie_name: String,

    /// Cookie path.
    pub cookie_path: String,

    /// Cookie lifetime in days.
    pub max_age_days: i64,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            cookie_name: "language".to_string(),
            cookie_path: "/".to_string(),
            max_age_days: 90,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Upstream connection timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}
