// ABOUTME: Shared resource container handed to every route as axum state
// ABOUTME: Holds the database handle and server configuration behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Routes receive
//! `State<Arc<ServerResources>>` and take their own per-request store handle
//! from [`ServerResources::database`].

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::pagination::{Page, PageQuery};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Entity store
    pub database: Arc<Database>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
        }
    }

    /// Normalize list query parameters against the configured bounds
    #[must_use]
    pub fn page(&self, query: PageQuery) -> Page {
        Page::from_query(query, self.config.pagination)
    }
}
