//! Locale resolution subsystem.
//!
//! # Data Flow
//! ```text
//! URL segment ("fr", "fr_FR", "fr-fr")
//!     → segment.rs (validate against UrlLanguageStyle, normalize)
//!     → catalog.rs (lang ↔ locale tables, allow-list membership)
//!
//! Accept-Language header
//!     → negotiate.rs (tokenize, order by q-factor, prefix match)
//!     → first allowed locale or None
//! ```
//!
//! # Design Decisions
//! - `Locale` is a thin newtype; it is not normalized on construction, so a
//!   non-canonical segment never accidentally matches the allow-list
//! - Catalog is immutable; reload replaces it wholesale
//! - No I/O in this module

pub mod catalog;
pub mod negotiate;
pub mod segment;
pub mod subtags;

pub use catalog::{CatalogError, LocaleCatalog};
pub use negotiate::{negotiate, parse_accept_language, AcceptLanguageEntry};
pub use segment::{parse_segment, render_segment, ParseError};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A language-country identifier such as `en_US`.
///
/// Canonical form is `xx_YY`; a bare language code is also representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build `lang_REGION` from its parts. Case is taken as given.
    pub fn from_parts(language: &str, region: &str) -> Self {
        Self(format!("{}_{}", language, region))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Language component (everything before the first underscore).
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    /// Region component, if the locale tracks one.
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, region)| region)
    }

    /// True for `xx_YY` with a lowercase ASCII language and an uppercase
    /// ASCII region, or a bare lowercase language code.
    pub fn is_canonical(&self) -> bool {
        let lang_ok = |s: &str| {
            (2..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_lowercase())
        };
        match self.0.split_once('_') {
            Some((lang, region)) => {
                lang_ok(lang)
                    && (2..=8).contains(&region.len())
                    && region
                        .bytes()
                        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            }
            None => lang_ok(&self.0),
        }
    }

    /// Lowercase, dash-separated rendering (`en_US` → `en-us`).
    pub fn to_dash_form(&self) -> String {
        self.0.to_lowercase().replace('_', "-")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How the language is carried in the first URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlLanguageStyle {
    /// Bare language code: `/en/`.
    Lang,
    /// Full locale: `/en_US/`.
    Locale,
    /// Lowercase dashed locale: `/en-us/`.
    LocaleDash,
}

impl UrlLanguageStyle {
    /// Derive the style from the two configuration switches.
    ///
    /// `use_dash_locale` has no effect unless `use_locale_url` is set.
    pub fn from_flags(use_locale_url: bool, use_dash_locale: bool) -> Self {
        match (use_locale_url, use_dash_locale) {
            (false, _) => Self::Lang,
            (true, false) => Self::Locale,
            (true, true) => Self::LocaleDash,
        }
    }

    /// Whether URLs carry the full locale rather than the bare language.
    pub fn uses_full_locale(self) -> bool {
        !matches!(self, Self::Lang)
    }
}

impl fmt::Display for UrlLanguageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lang => "lang",
            Self::Locale => "locale",
            Self::LocaleDash => "locale_dash",
        };
        f.write_str(name)
    }
}
