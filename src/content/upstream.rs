//! Forwarding of served content to an upstream content server.

use std::str::FromStr;
use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::locale::Locale;

/// Header carrying the resolved locale to the upstream.
pub const X_LOCALE: &str = "x-locale";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream address '{0}'")]
    InvalidAddress(String),

    #[error("invalid upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
}

/// HTTP client bound to one upstream content server.
#[derive(Clone)]
pub struct UpstreamClient {
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    pub fn new(address: &str, connect_timeout: Duration) -> Result<Self, UpstreamError> {
        let authority = Authority::from_str(address)
            .map_err(|_| UpstreamError::InvalidAddress(address.to_string()))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self { authority, client })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Fetch `/<canonical_path_prefix>` from the upstream on behalf of a visitor.
    pub async fn forward(
        &self,
        method: &Method,
        headers: &HeaderMap,
        canonical_path_prefix: &str,
        query: Option<&str>,
        locale: &Locale,
    ) -> Result<Response<Body>, UpstreamError> {
        let path_and_query = PathAndQuery::from_str(&upstream_path(canonical_path_prefix, query))
            .map_err(|e| UpstreamError::Request(axum::http::Error::from(e)))?;

        let uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?;

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        if let Some(out) = builder.headers_mut() {
            for (name, value) in headers.iter() {
                if name != header::HOST {
                    out.append(name.clone(), value.clone());
                }
            }
            if let Ok(value) = HeaderValue::from_str(locale.as_str()) {
                out.insert(X_LOCALE, value);
            }
        }
        let request = builder.body(Body::empty())?;

        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Request target for the upstream.
///
/// The prefix arrives percent-decoded from the route, so each path component
/// is encoded again. The query is passed through untouched.
fn upstream_path(canonical_path_prefix: &str, query: Option<&str>) -> String {
    let path = canonical_path_prefix
        .trim_start_matches('/')
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");

    match query {
        Some(q) => format!("/{}?{}", path, q),
        None => format!("/{}", path),
    }
}
