// ABOUTME: Error types re-exported from recipe-core plus store-specific error translation
// ABOUTME: Turns SQLite constraint violations into the same conflicts the uniqueness guard reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Re-exports the core error types and adds [`StoreErrorExt`], which makes the
//! storage layer's own constraints the final word on uniqueness: a duplicate
//! that races past the guard still surfaces as a clean conflict.

pub use recipe_core::errors::*;

/// Translation of `sqlx` failures into domain errors
pub trait StoreErrorExt<T> {
    /// Map a store failure, turning constraint violations into domain errors
    ///
    /// - unique violation → `ResourceAlreadyExists` with the message chosen by
    ///   `on_conflict` from the driver's constraint text
    /// - foreign key violation → `ResourceNotFound` with `on_missing_parent`
    /// - anything else → `DatabaseError` prefixed with `context`
    ///
    /// # Errors
    ///
    /// Always returns the translated error when `self` is `Err`
    fn or_store_error(
        self,
        context: &str,
        on_conflict: impl FnOnce(&str) -> &'static str,
        on_missing_parent: &'static str,
    ) -> AppResult<T>;

    /// Map a store failure that has no domain meaning
    ///
    /// # Errors
    ///
    /// Always returns a `DatabaseError` when `self` is `Err`
    fn or_database_error(self, context: &str) -> AppResult<T>;
}

impl<T> StoreErrorExt<T> for Result<T, sqlx::Error> {
    fn or_store_error(
        self,
        context: &str,
        on_conflict: impl FnOnce(&str) -> &'static str,
        on_missing_parent: &'static str,
    ) -> AppResult<T> {
        self.map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation() {
                    let message = on_conflict(db_error.message());
                    tracing::info!(reason = message, "Unique constraint rejected write");
                    return AppError::already_exists(message);
                }
                if db_error.is_foreign_key_violation() {
                    return AppError::not_found(on_missing_parent);
                }
            }
            AppError::database(format!("{context}: {e}")).with_source(e)
        })
    }

    fn or_database_error(self, context: &str) -> AppResult<T> {
        self.map_err(|e| AppError::database(format!("{context}: {e}")).with_source(e))
    }
}
