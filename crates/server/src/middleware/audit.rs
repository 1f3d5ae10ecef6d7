//! Access audit logging for clinical data reads

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::request_id::RequestId;

/// Log every read of clinical data for audit purposes.
///
/// The service is read-only, so any GET under `/api` touches patient or
/// doctor records; the query string carries the requested identifier.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    // Run the request first to get the response status
    let response = next.run(request).await;

    if method == Method::GET && path.starts_with("/api/") {
        let status = response.status().as_u16();

        tracing::info!(
            target: "audit",
            request_id = %request_id,
            path = %path,
            query = %query,
            status = %status,
            "Clinical data access"
        );
    }

    response
}
