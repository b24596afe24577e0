// ABOUTME: Recipe repository: create, lookup by id or slug, paged listing, merge update, delete
// ABOUTME: Runs on a borrowed SQLite connection so it joins the caller's transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use tracing::debug;

use super::guard::recipe_conflict;
use super::parse_timestamp;
use crate::constants::messages;
use crate::errors::{AppError, AppResult, StoreErrorExt};
use crate::models::{NewRecipe, Recipe, RecipeUpdate};
use crate::pagination::Page;

const RECIPE_COLUMNS: &str = "id, title, description, slug, created_at, updated_at";

/// Recipe database operations
pub struct RecipeRepository;

impl RecipeRepository {
    /// Insert a recipe; the store assigns id and timestamps
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the title or slug is taken, or a
    /// database error
    pub async fn create(conn: &mut SqliteConnection, new: &NewRecipe) -> AppResult<Recipe> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO recipes (title, description, slug, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.slug)
        .bind(now.to_rfc3339())
        .execute(&mut *conn)
        .await
        .or_store_error(
            "Failed to create recipe",
            recipe_conflict,
            messages::RECIPE_NOT_FOUND,
        )?;

        let id = result.last_insert_rowid();
        debug!(recipe.id = id, recipe.slug = %new.slug, "Recipe created");

        Ok(Recipe {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            slug: new.slug.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .or_database_error("Failed to get recipe")?;

        row.as_ref().map(row_to_recipe).transpose()
    }

    /// Get a recipe by its slug
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_slug(conn: &mut SqliteConnection, slug: &str) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await
            .or_database_error("Failed to get recipe by slug")?;

        row.as_ref().map(row_to_recipe).transpose()
    }

    /// Resolve a slug or fail with `Recipe does not exist`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no recipe has this slug
    pub async fn require_by_slug(conn: &mut SqliteConnection, slug: &str) -> AppResult<Recipe> {
        Self::get_by_slug(conn, slug)
            .await?
            .ok_or_else(|| AppError::not_found(messages::RECIPE_NOT_FOUND))
    }

    /// List recipes ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(conn: &mut SqliteConnection, page: Page) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await
        .or_database_error("Failed to list recipes")?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Merge `changes` into `current` and persist the result
    ///
    /// Absent fields keep their stored value. An empty update returns
    /// `current` unchanged without touching `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new title or slug is taken, or
    /// a database error
    pub async fn update(
        conn: &mut SqliteConnection,
        current: &Recipe,
        changes: &RecipeUpdate,
    ) -> AppResult<Recipe> {
        if changes.is_empty() {
            return Ok(current.clone());
        }

        let merged = Recipe {
            id: current.id,
            title: changes.title.clone().unwrap_or_else(|| current.title.clone()),
            description: changes
                .description
                .clone()
                .or_else(|| current.description.clone()),
            slug: changes.slug.clone().unwrap_or_else(|| current.slug.clone()),
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        sqlx::query(
            r"
            UPDATE recipes
            SET title = $1, description = $2, slug = $3, updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.slug)
        .bind(merged.updated_at.to_rfc3339())
        .bind(merged.id)
        .execute(&mut *conn)
        .await
        .or_store_error(
            "Failed to update recipe",
            recipe_conflict,
            messages::RECIPE_NOT_FOUND,
        )?;

        debug!(recipe.id = merged.id, "Recipe updated");
        Ok(merged)
    }

    /// Delete a recipe; its ingredients, steps, and category links cascade
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .or_database_error("Failed to delete recipe")?;

        debug!(recipe.id = id, deleted = result.rows_affected(), "Recipe delete");
        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Recipe {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        slug: row.get("slug"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
