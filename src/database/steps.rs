// ABOUTME: Step repository: create, lookup, ordered per-recipe listing, merge update, delete
// ABOUTME: Steps of a recipe are always read back by ascending step_number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use tracing::debug;

use crate::constants::messages;
use crate::errors::{AppResult, StoreErrorExt};
use crate::models::{NewStep, Step, StepUpdate};

const STEP_COLUMNS: &str = "id, step_number, step, recipe_id";

/// Step database operations
pub struct StepRepository;

impl StepRepository {
    /// Insert a step under its recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the position is taken in the recipe,
    /// `ResourceNotFound` for an unknown recipe, or a database error
    pub async fn create(conn: &mut SqliteConnection, new: &NewStep) -> AppResult<Step> {
        let result =
            sqlx::query("INSERT INTO steps (step_number, step, recipe_id) VALUES ($1, $2, $3)")
                .bind(new.step_number)
                .bind(&new.step)
                .bind(new.recipe_id)
                .execute(&mut *conn)
                .await
                .or_store_error(
                    "Failed to create step",
                    |_| messages::STEP_EXISTS,
                    messages::RECIPE_NOT_FOUND,
                )?;

        let id = result.last_insert_rowid();
        debug!(
            step.id = id,
            step.number = new.step_number,
            recipe.id = new.recipe_id,
            "Step created"
        );

        Ok(Step {
            id,
            step_number: new.step_number,
            step: new.step.clone(),
            recipe_id: new.recipe_id,
        })
    }

    /// Get a step by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Step>> {
        let row = sqlx::query(&format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .or_database_error("Failed to get step")?;

        Ok(row.as_ref().map(row_to_step))
    }

    /// Steps of one recipe ordered by `step_number`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_recipe(
        conn: &mut SqliteConnection,
        recipe_id: i64,
    ) -> AppResult<Vec<Step>> {
        let rows = sqlx::query(&format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE recipe_id = $1 ORDER BY step_number ASC"
        ))
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await
        .or_database_error("Failed to list recipe steps")?;

        Ok(rows.iter().map(row_to_step).collect())
    }

    /// Merge `changes` into `current` and persist the result
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new position is taken, or a
    /// database error
    pub async fn update(
        conn: &mut SqliteConnection,
        current: &Step,
        changes: &StepUpdate,
    ) -> AppResult<Step> {
        let merged = Step {
            id: current.id,
            step_number: changes.step_number.unwrap_or(current.step_number),
            step: changes.step.clone().unwrap_or_else(|| current.step.clone()),
            recipe_id: current.recipe_id,
        };

        sqlx::query("UPDATE steps SET step_number = $1, step = $2 WHERE id = $3")
            .bind(merged.step_number)
            .bind(&merged.step)
            .bind(merged.id)
            .execute(&mut *conn)
            .await
            .or_store_error(
                "Failed to update step",
                |_| messages::STEP_EXISTS,
                messages::RECIPE_NOT_FOUND,
            )?;

        Ok(merged)
    }

    /// Delete a step, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM steps WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .or_database_error("Failed to delete step")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_step(row: &SqliteRow) -> Step {
    Step {
        id: row.get("id"),
        step_number: row.get("step_number"),
        step: row.get("step"),
        recipe_id: row.get("recipe_id"),
    }
}
