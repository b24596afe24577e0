// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Builds the http_request span used by the tower-http TraceLayer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::Request;
use tracing::Span;

use super::request_id::REQUEST_ID_HEADER;

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
        status_code = tracing::field::Empty,
    )
}

/// `MakeSpan` function for `TraceLayer::make_span_with`
///
/// The request id header is read here when the client supplied one; the
/// request id middleware records generated ids into the same span.
pub fn make_request_span(request: &Request) -> Span {
    let span = create_request_span(request.method().as_str(), request.uri().path());

    if let Some(request_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        span.record("request_id", request_id);
    }

    span
}

/// `OnResponse` hook recording the status on the request span
pub fn record_response(response: &axum::response::Response, latency: std::time::Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    tracing::debug!(
        status = response.status().as_u16(),
        latency_ms = latency.as_millis(),
        "Request completed"
    );
}
