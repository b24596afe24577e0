// ABOUTME: Entity store for the recipe catalogue: pool setup, schema, and per-request handles
// ABOUTME: Re-exports the repositories, uniqueness guard, aggregate reader, and transaction guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The store holds four base tables (`recipes`, `ingredients`, `steps`,
//! `categories`) and one join table (`recipe_categories`). Non-empty and width
//! rules, uniqueness, foreign keys, and cascade delete are all declared in the
//! schema, so the store rejects bad rows even when a handler check is skipped.
//!
//! Handlers never share a connection: each request takes its own handle via
//! [`Database::begin`] (writes) or [`Database::acquire`] (reads), and the
//! repositories operate on the borrowed `SqliteConnection`.
//!
//! Write transactions take the `SQLite` write lock up front (`BEGIN
//! IMMEDIATE`), so a guard check and the insert that follows it never
//! interleave with another writer. A concurrent duplicate waits for the
//! winner to commit and then fails the guard with the usual conflict.

/// Recipe aggregate assembly
pub mod aggregate;
/// Category and recipe-category link repositories
pub mod categories;
/// Pre-write duplicate detection
pub mod guard;
/// Ingredient repository
pub mod ingredients;
/// Recipe repository
pub mod recipes;
/// Step repository
pub mod steps;
/// RAII transaction guard
pub mod transactions;

pub use aggregate::AggregateReader;
pub use categories::{CategoryRepository, RecipeCategoryRepository};
pub use guard::UniquenessGuard;
pub use ingredients::IngredientRepository;
pub use recipes::RecipeRepository;
pub use steps::StepRepository;
pub use transactions::{SqliteTransactionGuard, TransactionGuard};

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::config::environment::{DatabaseConfig, DatabaseUrl};
use crate::constants::limits;
use crate::errors::{AppError, AppResult, StoreErrorExt};

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the pool and create the schema
    ///
    /// In-memory databases get a single connection that is never recycled,
    /// since every `:memory:` connection is a separate database. File
    /// databases run in WAL mode so readers are not blocked by a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let mut options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .context("Invalid database connection string")?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !config.url.is_memory() {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if config.url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", config.url))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(url = %config.url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Start a request-scoped write transaction holding the write lock
    ///
    /// Waits up to the busy timeout for a concurrent writer to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired or the write lock
    /// cannot be taken
    pub async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .or_database_error("Failed to begin transaction")?;
        Ok(TransactionGuard::new(tx))
    }

    /// Acquire a request-scoped read connection, released on drop
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .or_database_error("Failed to acquire connection")
    }

    /// Round-trip a trivial query to prove the store is reachable
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::unavailable(format!("Database unreachable: {e}")).with_source(e))?;
        Ok(())
    }

    /// Create all tables and indexes if they do not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> Result<()> {
        for statement in schema() {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .context("Failed to create catalogue schema")?;
        }
        debug!("Catalogue schema ensured");
        Ok(())
    }
}

/// DDL for the catalogue, in dependency order
fn schema() -> Vec<String> {
    vec![
        format!(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE CHECK (length(title) BETWEEN 1 AND {title}),
                description TEXT CHECK (description IS NULL OR length(description) BETWEEN 1 AND {description}),
                slug TEXT NOT NULL UNIQUE CHECK (length(slug) BETWEEN 1 AND {slug}),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            title = limits::RECIPE_TITLE_MAX,
            description = limits::RECIPE_DESCRIPTION_MAX,
            slug = limits::RECIPE_SLUG_MAX,
        ),
        format!(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND {name}),
                amount TEXT NOT NULL CHECK (length(amount) BETWEEN 1 AND {amount}),
                measurement TEXT CHECK (measurement IS NULL OR length(measurement) BETWEEN 1 AND {measurement}),
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE (name, recipe_id)
            )
            ",
            name = limits::INGREDIENT_NAME_MAX,
            amount = limits::INGREDIENT_AMOUNT_MAX,
            measurement = limits::INGREDIENT_MEASUREMENT_MAX,
        ),
        format!(
            r"
            CREATE TABLE IF NOT EXISTS steps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                step_number INTEGER NOT NULL CHECK (step_number > 0),
                step TEXT NOT NULL CHECK (length(step) BETWEEN 1 AND {step}),
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE (recipe_id, step_number)
            )
            ",
            step = limits::STEP_TEXT_MAX,
        ),
        format!(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (length(name) BETWEEN 1 AND {name})
            )
            ",
            name = limits::CATEGORY_NAME_MAX,
        ),
        r"
        CREATE TABLE IF NOT EXISTS recipe_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            UNIQUE (recipe_id, category_id)
        )
        "
        .to_owned(),
        "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id)".to_owned(),
        "CREATE INDEX IF NOT EXISTS idx_recipe_categories_category ON recipe_categories(category_id)"
            .to_owned(),
    ]
}

/// Parse an RFC 3339 column into a UTC timestamp
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}
