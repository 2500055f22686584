//! Multilingual root-URL locale router library.

pub mod admin;
pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use locale::{Locale, LocaleCatalog, UrlLanguageStyle};
pub use routing::{RootRouter, RoutingDecision};
