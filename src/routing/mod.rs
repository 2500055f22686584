//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path segment, cookie, Accept-Language)
//!     → router.rs (RootRouter state machine)
//!         HasSegment → locale::segment → catalog allow-list
//!         NoSegment  → stored preference → locale::negotiate → default
//!     → decision.rs (ServeContent | Redirect | NotFound | BootstrapRedirect)
//!     → collaborators.rs (HttpResponder emits the response)
//! ```
//!
//! # Design Decisions
//! - Router compiled from config at startup, immutable at runtime
//! - Deterministic: same inputs always produce the same decision
//! - Per-request flags live in `RequestContext`, never in globals
//! - Collaborators are traits so tests substitute in-memory versions

pub mod collaborators;
pub mod decision;
pub mod router;

pub use collaborators::{
    ContentStore, HttpResponder, MemoryPreferences, PreferenceStore, RequestParts, RequestSource,
};
pub use decision::{RequestContext, RoutingDecision, NOT_FOUND_MESSAGE};
pub use router::RootRouter;
