// ABOUTME: Core types and constants for the recipe catalogue server
// ABOUTME: Foundation crate with error handling, offset pagination, and field limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! catalogue server. It changes infrequently, which keeps incremental builds
//! of the server crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorResponse`
//! - **constants**: Field limits, defaults, and service names
//! - **pagination**: Offset/limit pagination for list endpoints

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Offset/limit pagination for list endpoints
pub mod pagination;
