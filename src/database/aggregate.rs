// ABOUTME: Aggregate reader assembling a recipe with its ingredients, ordered steps, and category links
// ABOUTME: Pure reads: one recipe lookup plus three child lookups keyed by the recipe id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::SqliteConnection;

use crate::errors::AppResult;
use crate::models::{Recipe, RecipeAggregate};
use crate::pagination::Page;

use super::{IngredientRepository, RecipeCategoryRepository, RecipeRepository, StepRepository};

/// Read-side assembly of [`RecipeAggregate`]s
pub struct AggregateReader;

impl AggregateReader {
    /// Load the aggregate of the recipe with this slug
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` (`Recipe does not exist`) for an unknown
    /// slug, or a database error
    pub async fn load_by_slug(conn: &mut SqliteConnection, slug: &str) -> AppResult<RecipeAggregate> {
        let recipe = RecipeRepository::require_by_slug(conn, slug).await?;
        Self::assemble(conn, recipe).await
    }

    /// Load aggregates for a page of recipes ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails
    pub async fn load_page(conn: &mut SqliteConnection, page: Page) -> AppResult<Vec<RecipeAggregate>> {
        let recipes = RecipeRepository::list(conn, page).await?;

        let mut aggregates = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            aggregates.push(Self::assemble(conn, recipe).await?);
        }
        Ok(aggregates)
    }

    /// Attach the child collections of an already resolved recipe
    ///
    /// # Errors
    ///
    /// Returns an error if any child query fails
    pub async fn assemble(conn: &mut SqliteConnection, recipe: Recipe) -> AppResult<RecipeAggregate> {
        let ingredients = IngredientRepository::list_for_recipe(conn, recipe.id).await?;
        let steps = StepRepository::list_for_recipe(conn, recipe.id).await?;
        let categories = RecipeCategoryRepository::list_for_recipe(conn, recipe.id).await?;

        Ok(RecipeAggregate {
            recipe,
            ingredients,
            steps,
            categories,
        })
    }
}
