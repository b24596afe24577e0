// ABOUTME: Route handlers for ingredients: list, per-recipe lookup, create, update, delete
// ABOUTME: Update and delete are scoped by recipe slug so an id from another recipe is a 404
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use sqlx::SqliteConnection;

use crate::{
    constants::messages,
    database::{IngredientRepository, RecipeRepository, UniquenessGuard},
    errors::{AppError, AppResult},
    models::{Ingredient, IngredientUpdate, NewIngredient},
    pagination::PageQuery,
    resources::ServerResources,
};

/// Ingredient routes handler
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/ingredient", get(Self::handle_list))
            .route("/ingredient", post(Self::handle_create))
            .route("/ingredient/:slug", get(Self::handle_list_for_recipe))
            .route("/ingredient/:slug/:id", put(Self::handle_update))
            .route("/ingredient/:slug/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /ingredient - A page of all ingredients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page(query);
        let mut conn = resources.database.acquire().await?;

        let ingredients = IngredientRepository::list(&mut conn, page).await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle POST /ingredient - Add an ingredient to a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewIngredient>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        UniquenessGuard::require_recipe(tx.executor()?, body.recipe_id).await?;
        UniquenessGuard::check_ingredient(tx.executor()?, &body.name, body.recipe_id, None).await?;
        let ingredient = IngredientRepository::create(tx.executor()?, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    /// Handle GET /ingredient/:slug - Ingredients of one recipe
    async fn handle_list_for_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let mut conn = resources.database.acquire().await?;

        let recipe = RecipeRepository::require_by_slug(&mut conn, &slug).await?;
        let ingredients = IngredientRepository::list_for_recipe(&mut conn, recipe.id).await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle PUT /ingredient/:slug/:id - Merge the provided fields into an ingredient
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
        Json(body): Json<IngredientUpdate>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        let current = Self::require_owned(tx.executor()?, &slug, id).await?;

        if let Some(name) = &body.name {
            UniquenessGuard::check_ingredient(tx.executor()?, name, current.recipe_id, Some(id))
                .await?;
        }

        let ingredient = IngredientRepository::update(tx.executor()?, &current, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle DELETE /ingredient/:slug/:id - Remove an ingredient
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        Self::require_owned(tx.executor()?, &slug, id).await?;
        IngredientRepository::delete(tx.executor()?, id).await?;
        tx.commit().await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Resolve the recipe, then the ingredient within it
    async fn require_owned(
        conn: &mut SqliteConnection,
        slug: &str,
        id: i64,
    ) -> AppResult<Ingredient> {
        let recipe = RecipeRepository::require_by_slug(conn, slug).await?;
        IngredientRepository::get_by_id(conn, id)
            .await?
            .filter(|ingredient| ingredient.recipe_id == recipe.id)
            .ok_or_else(|| AppError::not_found(messages::INGREDIENT_NOT_FOUND))
    }
}
