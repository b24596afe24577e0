// ABOUTME: Integration tests for the request ID middleware
// ABOUTME: Covers id generation, reuse of client-supplied ids, and propagation through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for request ID middleware
//!
//! Tests the request ID middleware functionality including:
//! - UUID generation for each request
//! - Reuse of an incoming `x-request-id`
//! - Request ID availability in handlers via extensions

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{
    body::{to_bytes, Body},
    http::{Request as HttpRequest, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use helpers::axum_test::AxumTestRequest;
use recipe_catalogue_server::middleware::request_id::{
    request_id_middleware, RequestId, REQUEST_ID_HEADER,
};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_handler(Extension(request_id): Extension<RequestId>) -> String {
    format!("Request ID: {}", request_id.as_str())
}

fn test_app() -> Router {
    Router::new()
        .route("/", get(test_handler))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn test_request_id_middleware_generates_id() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;

    let response = test_app().oneshot(request).await?;

    let request_id_header = response.headers().get(REQUEST_ID_HEADER);
    assert!(request_id_header.is_some(), "Request ID header not present");

    if let Some(header_value) = request_id_header {
        let request_id_str = header_value.to_str()?;
        assert!(
            Uuid::parse_str(request_id_str).is_ok(),
            "Request ID is not a valid UUID"
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_request_id_available_in_handler() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;

    let response = test_app().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let body_str = String::from_utf8(body.to_vec())?;
    assert_eq!(body_str, format!("Request ID: {header}"));

    Ok(())
}

#[tokio::test]
async fn test_incoming_request_id_is_preserved() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "client-trace-42")
        .body(Body::empty())?;

    let response = test_app().oneshot(request).await?;

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "client-trace-42"
    );

    Ok(())
}

#[tokio::test]
async fn test_blank_request_id_is_replaced() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "   ")
        .body(Body::empty())?;

    let response = test_app().oneshot(request).await?;

    let value = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str()?;
    assert!(Uuid::parse_str(value).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_each_request_gets_distinct_id() {
    let first = AxumTestRequest::get("/").send(test_app()).await;
    let second = AxumTestRequest::get("/").send(test_app()).await;

    assert_ne!(
        first.header(REQUEST_ID_HEADER),
        second.header(REQUEST_ID_HEADER)
    );
}

#[tokio::test]
async fn test_catalogue_router_echoes_request_id() {
    let (app, _resources) = common::create_test_app().await;

    let response = AxumTestRequest::get("/recipe")
        .header(REQUEST_ID_HEADER, "abc-123")
        .send(app.clone())
        .await;
    assert_eq!(response.header(REQUEST_ID_HEADER).as_deref(), Some("abc-123"));

    // Error responses carry the id too
    let response = AxumTestRequest::get("/recipe/missing").send(app).await;
    assert_eq!(response.status(), 404);
    assert!(response.header(REQUEST_ID_HEADER).is_some());
}
