//! Content subsystem: the collaborator behind `ServeContent`.
//!
//! # Data Flow
//! ```text
//! RoutingDecision::ServeContent { locale, canonical_path_prefix }
//!     → store.rs (readiness, homepage link per locale)
//!     → upstream.rs (forward to content server, if configured)
//!     → local placeholder response otherwise
//! ```
//!
//! # Design Decisions
//! - The router never sees upstream details; it only asks `ContentStore`
//! - Readiness and homepage links come from config and change only on reload
//! - One upstream attempt per request; failures map to 502

pub mod store;
pub mod upstream;

pub use store::StaticContentStore;
pub use upstream::{UpstreamClient, UpstreamError};
