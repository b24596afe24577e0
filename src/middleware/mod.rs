// ABOUTME: HTTP middleware for request ids, request tracing, and CORS
// ABOUTME: Layers applied to every catalogue route by the router builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request id generation and propagation
pub mod request_id;
/// Request span construction
pub mod tracing;

pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use tracing::{create_request_span, make_request_span, record_response};
