// ABOUTME: Main library entry point for the recipe catalogue server
// ABOUTME: Exposes the entity store, uniqueness guard, aggregate reader, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Catalogue Server
//!
//! An HTTP service for creating and retrieving recipes together with their
//! ingredients, preparation steps, and categories, backed by `SQLite`.
//!
//! ## Architecture
//!
//! - **Database**: entity repositories, the uniqueness guard, and the
//!   aggregate reader, all running on a per-request connection or transaction
//! - **Routes**: thin axum handlers that validate payloads, call the store,
//!   and translate outcomes into status codes
//! - **Config / Logging / Middleware**: environment-driven settings,
//!   structured `tracing` output, request ids, and CORS
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_catalogue_server::config::environment::ServerConfig;
//! use recipe_catalogue_server::database::Database;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     println!("Recipe catalogue ready on port {}", config.http_port);
//!     drop(database);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants re-exported from the core crate
pub use recipe_core::constants;

/// Entity store, uniqueness guard, and aggregate reader
pub mod database;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request ids, tracing, and CORS
pub mod middleware;

/// Catalogue entities and request payloads
pub mod models;

/// Offset pagination re-exported from the core crate
pub use recipe_core::pagination;

/// Shared server resources handed to every route
pub mod resources;

/// `HTTP` routes for recipes, ingredients, steps, and categories
pub mod routes;

/// Server startup and graceful shutdown
pub mod server;
