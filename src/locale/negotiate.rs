//! Accept-Language negotiation.
//!
//! # Responsibilities
//! - Tokenize an Accept-Language header into (tag, q-factor) entries
//! - Order candidates by descending q-factor, header order within a tie
//! - Prefix-match candidates against the allow-list
//!
//! # Design Decisions
//! - Lenient tokenizer: anything outside the tag grammar is skipped, never an error
//! - Prefix matching lets a bare `en` select a stored `en_US`
//! - q=0 means "not acceptable" and drops the entry

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::locale::Locale;

static ACCEPT_LANGUAGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<code>[a-z]{1,8}(?:-[a-z]{1,8})?)\s*(?:;\s*q\s*=\s*(?P<priority>1|0\.[0-9]+))?")
        .expect("accept-language pattern is valid")
});

/// One language range from an Accept-Language header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptLanguageEntry {
    pub tag: String,
    pub priority: f32,
}

/// Parse a header into candidates, highest priority first.
///
/// A tag listed twice keeps its first position and its last priority.
pub fn parse_accept_language(header: &str) -> Vec<AcceptLanguageEntry> {
    let mut entries: Vec<AcceptLanguageEntry> = Vec::new();

    for caps in ACCEPT_LANGUAGE_TOKEN.captures_iter(header) {
        let Some(code) = caps.name("code") else {
            continue;
        };
        let priority = caps
            .name("priority")
            .and_then(|p| p.as_str().parse::<f32>().ok())
            .unwrap_or(1.0);

        match entries.iter_mut().find(|e| e.tag == code.as_str()) {
            Some(existing) => existing.priority = priority,
            None => entries.push(AcceptLanguageEntry {
                tag: code.as_str().to_string(),
                priority,
            }),
        }
    }

    entries.retain(|e| e.priority > 0.0);
    // sort_by is stable, so equal priorities keep header order
    entries.sort_by(|a, b| b.priority.partial_cmp(&a.priority).unwrap_or(Ordering::Equal));
    entries
}

/// Pick the first allowed locale matching the header's preferences.
pub fn negotiate(header: &str, allowed: &[Locale]) -> Option<Locale> {
    for entry in parse_accept_language(header) {
        let candidate = entry.tag.to_lowercase();
        for locale in allowed {
            if locale.to_dash_form().starts_with(&candidate) {
                return Some(locale.clone());
            }
        }
    }
    None
}
