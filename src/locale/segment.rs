//! URL language segment parsing.
//!
//! # Responsibilities
//! - Validate the first path segment against the configured URL style
//! - Rewrite dash locales (`fr-fr`) into internal form (`fr_FR`)
//! - Render a locale back into its canonical segment
//!
//! # Design Decisions
//! - The parser never sees an empty segment; absence is handled by the router
//! - Only the country part of a dash locale is case-folded
//! - Errors are local and always end in a 404, never propagated further

use thiserror::Error;

use crate::locale::{Locale, LocaleCatalog, UrlLanguageStyle};

/// Why a segment cannot name a locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Wrong separator or casing for the configured style.
    #[error("malformed language segment '{0}'")]
    Malformed(String),

    /// Well-formed language code with no known locale.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
}

/// Parse a URL segment into a locale under `style`.
pub fn parse_segment(
    segment: &str,
    style: UrlLanguageStyle,
    catalog: &LocaleCatalog,
) -> Result<Locale, ParseError> {
    match style {
        UrlLanguageStyle::Lang => {
            if segment.contains(['_', '-']) {
                return Err(ParseError::Malformed(segment.to_string()));
            }
            catalog
                .lang_to_locale(segment)
                .ok_or_else(|| ParseError::UnknownLanguage(segment.to_string()))
        }
        UrlLanguageStyle::Locale => match segment.split_once('_') {
            Some((lang, region))
                if !lang.is_empty() && !region.is_empty() && !region.contains('_') =>
            {
                Ok(Locale::new(segment))
            }
            _ => Err(ParseError::Malformed(segment.to_string())),
        },
        UrlLanguageStyle::LocaleDash => {
            let (lang, region) = match segment.split_once('-') {
                Some((lang, region))
                    if !lang.is_empty() && !region.is_empty() && !region.contains('-') =>
                {
                    (lang, region)
                }
                _ => return Err(ParseError::Malformed(segment.to_string())),
            };

            // The canonical dash form is the locale with its region
            // lowercased, so a segment is accepted only when upper-casing the
            // region changes it. Two consequences:
            // - any uppercase is malformed: `en-US` is a 404, not a redirect
            //   to `en-us`
            // - a region without letters (`es-419`) is malformed, so locales
            //   with numeric regions cannot be served in this style
            if segment.chars().any(char::is_uppercase)
                || !region.chars().any(|c| c.is_ascii_alphabetic())
            {
                return Err(ParseError::Malformed(segment.to_string()));
            }

            Ok(Locale::from_parts(lang, &region.to_uppercase()))
        }
    }
}

/// Render the canonical URL segment for `locale` under `style`.
pub fn render_segment(locale: &Locale, style: UrlLanguageStyle) -> String {
    match style {
        UrlLanguageStyle::Lang => locale.language().to_string(),
        UrlLanguageStyle::Locale => locale.as_str().to_string(),
        UrlLanguageStyle::LocaleDash => locale.to_dash_form(),
    }
}
