// ABOUTME: Uniqueness guard: pre-write duplicate detection for every catalogue entity
// ABOUTME: Also resolves parent recipes before child inserts so missing parents are a clean 404
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Uniqueness Guard
//!
//! Each check runs one SQL query with real `AND` / `OR` predicates against
//! the caller's connection and fails with `ResourceAlreadyExists` when a
//! conflicting row exists. Pass `exclude_id` when checking an update so the
//! row does not conflict with itself.
//!
//! The guard only gives the fast, readable rejection. The schema's UNIQUE
//! constraints remain authoritative: a duplicate that races past a check is
//! mapped to the same message by the repositories.

use sqlx::{Row, SqliteConnection};

use crate::constants::messages;
use crate::errors::{AppError, AppResult, StoreErrorExt};
use crate::models::Recipe;

use super::RecipeRepository;

/// Choose the recipe conflict message from a UNIQUE violation's text
pub(crate) fn recipe_conflict(db_message: &str) -> &'static str {
    if db_message.contains("recipes.title") {
        messages::RECIPE_TITLE_EXISTS
    } else {
        messages::RECIPE_SLUG_EXISTS
    }
}

/// Pre-write duplicate detection
pub struct UniquenessGuard;

impl UniquenessGuard {
    /// Reject a recipe whose title or slug is already used
    ///
    /// When both match, the title message wins.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on conflict, or a database error
    pub async fn check_recipe(
        conn: &mut SqliteConnection,
        title: &str,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(MAX(title = $1), 0) AS title_taken, COUNT(*) AS conflicts
            FROM recipes
            WHERE (title = $1 OR slug = $2) AND id IS NOT $3
            ",
        )
        .bind(title)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
        .or_database_error("Failed to check recipe uniqueness")?;

        let title_taken: i64 = row.get("title_taken");
        let conflicts: i64 = row.get("conflicts");

        if title_taken > 0 {
            return Err(conflict(messages::RECIPE_TITLE_EXISTS));
        }
        if conflicts > 0 {
            return Err(conflict(messages::RECIPE_SLUG_EXISTS));
        }
        Ok(())
    }

    /// Reject an ingredient whose name is already used in the same recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on conflict, or a database error
    pub async fn check_ingredient(
        conn: &mut SqliteConnection,
        name: &str,
        recipe_id: i64,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM ingredients WHERE name = $1 AND recipe_id = $2 AND id IS NOT $3)",
        )
        .bind(name)
        .bind(recipe_id)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
        .or_database_error("Failed to check ingredient uniqueness")?;

        reject_if(taken, messages::INGREDIENT_EXISTS)
    }

    /// Reject a category whose name is already used
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on conflict, or a database error
    pub async fn check_category(conn: &mut SqliteConnection, name: &str) -> AppResult<()> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&mut *conn)
                .await
                .or_database_error("Failed to check category uniqueness")?;

        reject_if(taken, messages::CATEGORY_EXISTS)
    }

    /// Reject a second link between the same recipe and category
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on conflict, or a database error
    pub async fn check_recipe_category(
        conn: &mut SqliteConnection,
        recipe_id: i64,
        category_id: i64,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM recipe_categories WHERE category_id = $1 AND recipe_id = $2 AND id IS NOT $3)",
        )
        .bind(category_id)
        .bind(recipe_id)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
        .or_database_error("Failed to check category link uniqueness")?;

        reject_if(taken, messages::RECIPE_CATEGORY_EXISTS)
    }

    /// Reject a step whose position is already used in the same recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on conflict, or a database error
    pub async fn check_step(
        conn: &mut SqliteConnection,
        recipe_id: i64,
        step_number: i64,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM steps WHERE recipe_id = $1 AND step_number = $2 AND id IS NOT $3)",
        )
        .bind(recipe_id)
        .bind(step_number)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
        .or_database_error("Failed to check step uniqueness")?;

        reject_if(taken, messages::STEP_EXISTS)
    }

    /// Resolve the parent of a child insert
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` (`Recipe does not exist`) when the id is
    /// unknown, or a database error
    pub async fn require_recipe(conn: &mut SqliteConnection, recipe_id: i64) -> AppResult<Recipe> {
        RecipeRepository::get_by_id(conn, recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(messages::RECIPE_NOT_FOUND))
    }
}

fn conflict(message: &'static str) -> AppError {
    tracing::info!(reason = message, "Uniqueness guard rejected write");
    AppError::already_exists(message)
}

fn reject_if(taken: bool, message: &'static str) -> AppResult<()> {
    if taken {
        Err(conflict(message))
    } else {
        Ok(())
    }
}
