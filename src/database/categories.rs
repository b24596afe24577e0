// ABOUTME: Category repository and recipe-category link repository
// ABOUTME: Categories stand alone with unique names; links join one recipe to one category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use tracing::debug;

use crate::constants::messages;
use crate::errors::{AppError, AppResult, StoreErrorExt};
use crate::models::{Category, RecipeCategory, RecipeCategoryUpdate};
use crate::pagination::Page;

/// Category database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// Insert a category
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the name is taken, or a database error
    pub async fn create(conn: &mut SqliteConnection, name: &str) -> AppResult<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES ($1)")
            .bind(name)
            .execute(&mut *conn)
            .await
            .or_store_error(
                "Failed to create category",
                |_| messages::CATEGORY_EXISTS,
                messages::CATEGORY_NOT_FOUND,
            )?;

        let id = result.last_insert_rowid();
        debug!(category.id = id, category.name = %name, "Category created");

        Ok(Category {
            id,
            name: name.to_owned(),
        })
    }

    /// Get a category by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .or_database_error("Failed to get category")?;

        Ok(row.as_ref().map(row_to_category))
    }

    /// Get a category by its unique name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> AppResult<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .or_database_error("Failed to get category by name")?;

        Ok(row.as_ref().map(row_to_category))
    }

    /// Resolve a category name or fail with `Category does not exist`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no category has this name
    pub async fn require_by_name(conn: &mut SqliteConnection, name: &str) -> AppResult<Category> {
        Self::get_by_name(conn, name)
            .await?
            .ok_or_else(|| AppError::not_found(messages::CATEGORY_NOT_FOUND))
    }

    /// List categories ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(conn: &mut SqliteConnection, page: Page) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await
            .or_database_error("Failed to list categories")?;

        Ok(rows.iter().map(row_to_category).collect())
    }
}

/// Recipe-category link database operations
pub struct RecipeCategoryRepository;

impl RecipeCategoryRepository {
    /// Link a recipe to a category
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the pair is already linked,
    /// `ResourceNotFound` if either side is missing, or a database error
    pub async fn create(
        conn: &mut SqliteConnection,
        recipe_id: i64,
        category_id: i64,
    ) -> AppResult<RecipeCategory> {
        let result =
            sqlx::query("INSERT INTO recipe_categories (recipe_id, category_id) VALUES ($1, $2)")
                .bind(recipe_id)
                .bind(category_id)
                .execute(&mut *conn)
                .await
                .or_store_error(
                    "Failed to link category",
                    |_| messages::RECIPE_CATEGORY_EXISTS,
                    messages::RECIPE_NOT_FOUND,
                )?;

        let id = result.last_insert_rowid();
        debug!(link.id = id, recipe.id = recipe_id, category.id = category_id, "Category linked");

        Ok(RecipeCategory {
            id,
            category_id,
            recipe_id,
        })
    }

    /// Get a link by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> AppResult<Option<RecipeCategory>> {
        let row =
            sqlx::query("SELECT id, category_id, recipe_id FROM recipe_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .or_database_error("Failed to get category link")?;

        Ok(row.as_ref().map(row_to_link))
    }

    /// Links of one recipe in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_recipe(
        conn: &mut SqliteConnection,
        recipe_id: i64,
    ) -> AppResult<Vec<RecipeCategory>> {
        let rows = sqlx::query(
            "SELECT id, category_id, recipe_id FROM recipe_categories WHERE recipe_id = $1 ORDER BY id",
        )
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await
        .or_database_error("Failed to list recipe categories")?;

        Ok(rows.iter().map(row_to_link).collect())
    }

    /// Point a link at another category
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the recipe is already linked to that
    /// category, `ResourceNotFound` if the category is missing, or a database
    /// error
    pub async fn update(
        conn: &mut SqliteConnection,
        current: &RecipeCategory,
        changes: &RecipeCategoryUpdate,
    ) -> AppResult<RecipeCategory> {
        let merged = RecipeCategory {
            category_id: changes.category_id.unwrap_or(current.category_id),
            ..*current
        };

        sqlx::query("UPDATE recipe_categories SET category_id = $1 WHERE id = $2")
            .bind(merged.category_id)
            .bind(merged.id)
            .execute(&mut *conn)
            .await
            .or_store_error(
                "Failed to update category link",
                |_| messages::RECIPE_CATEGORY_EXISTS,
                messages::CATEGORY_NOT_FOUND,
            )?;

        Ok(merged)
    }

    /// Delete a link, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipe_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .or_database_error("Failed to delete category link")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_category(row: &SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
    }
}

fn row_to_link(row: &SqliteRow) -> RecipeCategory {
    RecipeCategory {
        id: row.get("id"),
        category_id: row.get("category_id"),
        recipe_id: row.get("recipe_id"),
    }
}
