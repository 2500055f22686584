//! Config-backed content store.

use std::collections::HashMap;

use crate::config::ContentConfig;
use crate::locale::Locale;
use crate::routing::ContentStore;

/// Readiness flag and homepage links taken from `[content]`.
#[derive(Debug, Clone)]
pub struct StaticContentStore {
    ready: bool,
    default_link: String,
    links: HashMap<Locale, String>,
}

impl StaticContentStore {
    pub fn from_config(config: &ContentConfig) -> Self {
        let links = config
            .homepage_links
            .iter()
            .map(|(locale, link)| (Locale::new(locale.as_str()), link.trim_matches('/').to_string()))
            .collect();

        Self {
            ready: config.ready,
            default_link: config.default_homepage_link.trim_matches('/').to_string(),
            links,
        }
    }
}

impl ContentStore for StaticContentStore {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn homepage_link(&self, locale: &Locale) -> String {
        self.links
            .get(locale)
            .cloned()
            .unwrap_or_else(|| self.default_link.clone())
    }
}
