// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory catalogue resources, routers, and seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_catalogue_server`

use std::path::Path;
use std::sync::{Arc, Once};

use recipe_catalogue_server::{
    config::environment::{DatabaseConfig, DatabaseUrl, ServerConfig},
    database::{CategoryRepository, Database, RecipeRepository},
    models::{Category, NewRecipe, Recipe},
    resources::ServerResources,
    routes::build_router,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    let config = ServerConfig::for_testing();
    Database::new(&config.database)
        .await
        .expect("Failed to create in-memory database")
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(database, ServerConfig::for_testing()))
}

/// Resources over a file-backed database with a multi-connection pool
pub async fn create_file_test_resources(dir: &Path) -> Arc<ServerResources> {
    init_test_logging();
    let mut config = ServerConfig::for_testing();
    config.database = DatabaseConfig {
        url: DatabaseUrl::SQLite {
            path: dir.join("catalogue.db"),
        },
        max_connections: 5,
    };
    let database = Database::new(&config.database)
        .await
        .expect("Failed to create file database");
    Arc::new(ServerResources::new(database, config))
}

/// Full application router plus the resources behind it
pub async fn create_test_app() -> (axum::Router, Arc<ServerResources>) {
    let resources = create_test_resources().await;
    (build_router(&resources), resources)
}

/// Insert a recipe directly through the store
pub async fn seed_recipe(resources: &ServerResources, title: &str, slug: &str) -> Recipe {
    let mut tx = resources.database.begin().await.unwrap();
    let recipe = RecipeRepository::create(
        tx.executor().unwrap(),
        &NewRecipe {
            title: title.to_owned(),
            description: None,
            slug: slug.to_owned(),
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
    recipe
}

/// Insert a category directly through the store
pub async fn seed_category(resources: &ServerResources, name: &str) -> Category {
    let mut tx = resources.database.begin().await.unwrap();
    let category = CategoryRepository::create(tx.executor().unwrap(), name)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    category
}

/// Count rows of a table
pub async fn count_rows(resources: &ServerResources, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(resources.database.pool())
        .await
        .unwrap()
}
