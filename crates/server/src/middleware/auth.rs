//! API key authentication and subject claims
//!
//! Identifiers in query strings are caller-supplied and untrusted. Access
//! requires both the service API key and a gateway-authenticated subject
//! claim matching the record being read; the store itself carries no
//! access control.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use carecms_core::outcome::{Outcome, OutcomeCode};

use crate::error::AppError;

/// Header carrying the subject of the authenticated session, set by the
/// fronting gateway after it has verified the caller.
pub const SUBJECT_HEADER: &str = "X-Subject-Id";

/// API key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn allows(&self, headers: &HeaderMap) -> bool {
        match &self.api_key {
            // No key configured: authentication disabled
            None => true,
            Some(expected) => headers
                .get("X-API-Key")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|presented| presented == expected),
        }
    }
}

/// Reject requests that do not present the configured API key
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let auth = request.extensions().get::<ApiKeyAuth>().cloned();

    if let Some(auth) = auth {
        if !auth.allows(request.headers()) {
            let outcome = Outcome::error(OutcomeCode::Unauthorized, "Missing or invalid API key");
            return (StatusCode::UNAUTHORIZED, Json(outcome)).into_response();
        }
    }

    next.run(request).await
}

/// Require that the authenticated subject matches the identifier being
/// read. Handlers call this after parsing the identifier and before
/// touching the store, so a mismatch reveals no data.
pub fn require_subject_match(headers: &HeaderMap, requested: Uuid) -> Result<(), AppError> {
    let subject = headers
        .get(SUBJECT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok());

    match subject {
        Some(subject) if subject == requested => Ok(()),
        Some(_) => Err(AppError::Forbidden(
            "Subject claim does not match the requested record".to_string(),
        )),
        None => Err(AppError::Forbidden("Missing subject claim".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_subject(subject: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SUBJECT_HEADER, HeaderValue::from_str(subject).unwrap());
        headers
    }

    #[test]
    fn matching_subject_is_allowed() {
        let id = Uuid::from_u128(7);
        let headers = headers_with_subject(&id.to_string());
        assert!(require_subject_match(&headers, id).is_ok());
    }

    #[test]
    fn mismatched_or_missing_subject_is_forbidden() {
        let id = Uuid::from_u128(7);
        let other = Uuid::from_u128(8);
        let headers = headers_with_subject(&other.to_string());
        assert!(matches!(
            require_subject_match(&headers, id),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            require_subject_match(&HeaderMap::new(), id),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn malformed_subject_counts_as_missing() {
        let headers = headers_with_subject("not-a-uuid");
        assert!(require_subject_match(&headers, Uuid::from_u128(7)).is_err());
    }
}
