//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Adapt an inbound HTTP request to the router's `RequestSource`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Adapter borrows from the request; nothing is copied but the URL

use axum::http::{header, HeaderMap, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::routing::RequestSource;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 for every request without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The request ID of a request, or "unknown".
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Borrowed view of an HTTP request for the router.
#[derive(Debug)]
pub struct InboundRequest<'a> {
    segment: Option<&'a str>,
    accept_language: Option<&'a str>,
    url: String,
}

impl<'a> InboundRequest<'a> {
    pub fn new(segment: Option<&'a str>, uri: &Uri, headers: &'a HeaderMap) -> Self {
        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Self {
            segment,
            accept_language: headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok()),
            url,
        }
    }
}

impl RequestSource for InboundRequest<'_> {
    fn path_segment(&self) -> Option<&str> {
        self.segment
    }

    fn accept_language_header(&self) -> Option<&str> {
        self.accept_language
    }

    fn original_url(&self) -> Option<&str> {
        Some(&self.url)
    }
}
