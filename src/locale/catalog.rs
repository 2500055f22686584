//! Allowed locales, default locale and language ↔ locale tables.
//!
//! # Responsibilities
//! - Answer allow-list membership
//! - Map a bare language code to the locale it stands for
//! - Expose the default locale and language
//!
//! # Design Decisions
//! - Built once from `LocaleConfig`, read-only afterwards
//! - `reload` takes `&mut self`: callers must hold the catalog exclusively,
//!   which keeps reloads out of in-flight decisions
//! - Membership is an exact string match; no case folding

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::LocaleConfig;
use crate::locale::{subtags, Locale, UrlLanguageStyle};

/// Errors raised while building a catalog from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("allowed_locales must not be empty")]
    EmptyAllowList,

    #[error("locale '{0}' is not in canonical xx_YY form")]
    NonCanonicalLocale(String),

    #[error("locale '{0}' is listed more than once")]
    DuplicateLocale(String),

    #[error("default locale '{0}' is not in allowed_locales")]
    DefaultNotAllowed(String),

    #[error("language override '{lang}' → '{locale}' is invalid")]
    InvalidOverride { lang: String, locale: String },
}

/// Immutable locale lookup tables.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    style: UrlLanguageStyle,
    default_locale: Locale,
    allowed: Vec<Locale>,
    lang_overrides: HashMap<String, Locale>,
}

impl LocaleCatalog {
    /// Build a catalog, rejecting inconsistent settings.
    pub fn from_config(config: &LocaleConfig) -> Result<Self, CatalogError> {
        if config.allowed_locales.is_empty() {
            return Err(CatalogError::EmptyAllowList);
        }

        let mut allowed: Vec<Locale> = Vec::with_capacity(config.allowed_locales.len());
        for raw in &config.allowed_locales {
            let locale = Locale::new(raw.as_str());
            if !locale.is_canonical() || locale.region().is_none() {
                return Err(CatalogError::NonCanonicalLocale(raw.clone()));
            }
            if allowed.contains(&locale) {
                return Err(CatalogError::DuplicateLocale(raw.clone()));
            }
            allowed.push(locale);
        }

        let default_locale = Locale::new(config.default_locale.as_str());
        if !allowed.contains(&default_locale) {
            return Err(CatalogError::DefaultNotAllowed(config.default_locale.clone()));
        }

        let mut lang_overrides = HashMap::with_capacity(config.lang_overrides.len());
        for (lang, raw) in &config.lang_overrides {
            let locale = Locale::new(raw.as_str());
            if !locale.is_canonical() || locale.language() != lang {
                return Err(CatalogError::InvalidOverride {
                    lang: lang.clone(),
                    locale: raw.clone(),
                });
            }
            lang_overrides.insert(lang.clone(), locale);
        }

        Ok(Self {
            style: config.style(),
            default_locale,
            allowed,
            lang_overrides,
        })
    }

    /// Replace the catalog contents with freshly validated settings.
    ///
    /// On error the current contents are left untouched.
    pub fn reload(&mut self, config: &LocaleConfig) -> Result<(), CatalogError> {
        *self = Self::from_config(config)?;
        Ok(())
    }

    pub fn style(&self) -> UrlLanguageStyle {
        self.style
    }

    /// Allowed locales in configured order.
    pub fn allowed(&self) -> &[Locale] {
        &self.allowed
    }

    pub fn is_allowed(&self, locale: &Locale) -> bool {
        self.allowed.contains(locale)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn default_lang(&self) -> &str {
        self.default_locale.language()
    }

    /// Resolve a bare language code to a locale.
    ///
    /// Lookup order: configured overrides, the first allowed locale with that
    /// language, then the built-in likely-subtags table.
    pub fn lang_to_locale(&self, lang: &str) -> Option<Locale> {
        if let Some(locale) = self.lang_overrides.get(lang) {
            return Some(locale.clone());
        }
        if let Some(locale) = self.allowed.iter().find(|l| l.language() == lang) {
            return Some(locale.clone());
        }
        subtags::likely_locale(lang).map(Locale::new)
    }

    pub fn locale_to_lang<'a>(&self, locale: &'a Locale) -> &'a str {
        locale.language()
    }
}
