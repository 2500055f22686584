//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, reloadable state)
//!     → request.rs (request ID, segment + Accept-Language view)
//!     → cookies.rs (stored language preference)
//!     → [routing layer decides]
//!     → response.rs (redirect / 404 / content, locale headers, Set-Cookie)
//!     → Send to client
//! ```

pub mod cookies;
pub mod request;
pub mod response;
pub mod server;

pub use cookies::{CookiePreferences, PreferenceChange};
pub use request::{request_id, InboundRequest, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{apply_preference, decorate_content, AxumResponder};
pub use server::{AppState, DecisionSummary, HttpServer, InnerState, StateError};
