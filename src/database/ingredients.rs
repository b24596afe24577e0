// ABOUTME: Ingredient repository: create, lookups, per-recipe listing, merge update, delete
// ABOUTME: Ingredient names are unique within a recipe; the schema backs that with a UNIQUE pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use tracing::debug;

use crate::constants::messages;
use crate::errors::{AppResult, StoreErrorExt};
use crate::models::{Ingredient, IngredientUpdate, NewIngredient};
use crate::pagination::Page;

const INGREDIENT_COLUMNS: &str = "id, name, amount, measurement, recipe_id";

/// Ingredient database operations
pub struct IngredientRepository;

impl IngredientRepository {
    /// Insert an ingredient under its recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` for a duplicate name in the recipe,
    /// `ResourceNotFound` for an unknown recipe, or a database error
    pub async fn create(conn: &mut SqliteConnection, new: &NewIngredient) -> AppResult<Ingredient> {
        let result = sqlx::query(
            r"
            INSERT INTO ingredients (name, amount, measurement, recipe_id)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&new.name)
        .bind(&new.amount)
        .bind(&new.measurement)
        .bind(new.recipe_id)
        .execute(&mut *conn)
        .await
        .or_store_error(
            "Failed to create ingredient",
            |_| messages::INGREDIENT_EXISTS,
            messages::RECIPE_NOT_FOUND,
        )?;

        let id = result.last_insert_rowid();
        debug!(ingredient.id = id, recipe.id = new.recipe_id, "Ingredient created");

        Ok(Ingredient {
            id,
            name: new.name.clone(),
            amount: new.amount.clone(),
            measurement: new.measurement.clone(),
            recipe_id: new.recipe_id,
        })
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .or_database_error("Failed to get ingredient")?;

        Ok(row.as_ref().map(row_to_ingredient))
    }

    /// First ingredient with this name across all recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .or_database_error("Failed to get ingredient by name")?;

        Ok(row.as_ref().map(row_to_ingredient))
    }

    /// List all ingredients ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(conn: &mut SqliteConnection, page: Page) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await
        .or_database_error("Failed to list ingredients")?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Ingredients of one recipe in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_recipe(
        conn: &mut SqliteConnection,
        recipe_id: i64,
    ) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE recipe_id = $1 ORDER BY id"
        ))
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await
        .or_database_error("Failed to list recipe ingredients")?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Merge `changes` into `current` and persist the result
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new name is taken in the
    /// recipe, or a database error
    pub async fn update(
        conn: &mut SqliteConnection,
        current: &Ingredient,
        changes: &IngredientUpdate,
    ) -> AppResult<Ingredient> {
        let merged = Ingredient {
            id: current.id,
            name: changes.name.clone().unwrap_or_else(|| current.name.clone()),
            amount: changes.amount.clone().unwrap_or_else(|| current.amount.clone()),
            measurement: changes
                .measurement
                .clone()
                .or_else(|| current.measurement.clone()),
            recipe_id: current.recipe_id,
        };

        sqlx::query("UPDATE ingredients SET name = $1, amount = $2, measurement = $3 WHERE id = $4")
            .bind(&merged.name)
            .bind(&merged.amount)
            .bind(&merged.measurement)
            .bind(merged.id)
            .execute(&mut *conn)
            .await
            .or_store_error(
                "Failed to update ingredient",
                |_| messages::INGREDIENT_EXISTS,
                messages::RECIPE_NOT_FOUND,
            )?;

        Ok(merged)
    }

    /// Delete an ingredient, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .or_database_error("Failed to delete ingredient")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        amount: row.get("amount"),
        measurement: row.get("measurement"),
        recipe_id: row.get("recipe_id"),
    }
}
