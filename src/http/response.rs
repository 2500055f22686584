//! Response emission.
//!
//! # Responsibilities
//! - Turn a `RoutingDecision` into an axum `Response`
//! - Attach the preference cookie and locale headers
//!
//! # Design Decisions
//! - Redirect statuses come from the decision; axum's `Redirect` helpers
//!   are not used because they emit 303/307/308
//! - Served content carries `Content-Language` in BCP 47 form (`fr-FR`)

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::content::upstream::X_LOCALE;
use crate::locale::Locale;
use crate::routing::HttpResponder;

/// Emits responses for locally answered decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxumResponder;

impl HttpResponder for AxumResponder {
    type Response = Response;

    fn redirect(self, path: &str, status: StatusCode) -> Response {
        match HeaderValue::from_str(path) {
            Ok(location) => (status, [(header::LOCATION, location)]).into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }

    fn not_found(self, status: StatusCode, message: &str) -> Response {
        (status, message.to_string()).into_response()
    }

    fn ok(self, locale: &Locale, canonical_path_prefix: &str) -> Response {
        let body = format!("locale: {}\npath: /{}\n", locale, canonical_path_prefix);
        let mut response = (StatusCode::OK, body).into_response();
        decorate_content(&mut response, locale);
        response
    }
}

/// Add the locale headers to a served-content response.
pub fn decorate_content(response: &mut Response, locale: &Locale) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&locale.as_str().replace('_', "-")) {
        headers.insert(header::CONTENT_LANGUAGE, value);
    }
    if let Ok(value) = HeaderValue::from_str(locale.as_str()) {
        headers.insert(X_LOCALE, value);
    }
}

/// Append the pending preference cookie, if any.
pub fn apply_preference(mut response: Response, cookie: Option<HeaderValue>) -> Response {
    if let Some(cookie) = cookie {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}
