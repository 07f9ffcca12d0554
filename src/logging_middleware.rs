// src/logging_middleware.rs
//! Middleware for logging submitted form bodies and response summaries in debug mode

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, enabled, Level};

/// Form payloads larger than this, or without a `Content-Length`, are passed
/// through without being buffered for logging
const MAX_LOGGED_BODY: usize = 64 * 1024;

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Logs urlencoded request bodies and the status/size of every response
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let is_form = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("application/x-www-form-urlencoded"));

    let loggable = declared_length(&parts.headers).map_or(false, |len| len <= MAX_LOGGED_BODY);

    let request = if is_form && loggable {
        let bytes = to_bytes(body, MAX_LOGGED_BODY)
            .await
            .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                form = %body_str,
                "📥 Form submitted"
            );
        }

        Request::from_parts(parts, Body::from(bytes))
    } else if is_form {
        debug!(method = %parts.method, uri = %parts.uri, "📥 Form submitted (body not logged)");
        Request::from_parts(parts, body)
    } else {
        debug!(method = %parts.method, uri = %parts.uri, "📥 Request");
        Request::from_parts(parts, body)
    };

    let response = next.run(request).await;

    debug!(
        status = %response.status(),
        location = ?response.headers().get(axum::http::header::LOCATION),
        "📤 Response"
    );

    Ok(response)
}
