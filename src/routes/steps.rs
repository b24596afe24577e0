// ABOUTME: Route handlers for preparation steps: ordered per-recipe lookup, create, update, delete
// ABOUTME: Step positions are unique within a recipe and read back in ascending order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use sqlx::SqliteConnection;

use crate::{
    constants::messages,
    database::{RecipeRepository, StepRepository, UniquenessGuard},
    errors::{AppError, AppResult},
    models::{NewStep, Step, StepUpdate},
    resources::ServerResources,
};

/// Step routes handler
pub struct StepRoutes;

impl StepRoutes {
    /// Create all step routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/step", post(Self::handle_create))
            .route("/steps/:slug", get(Self::handle_list_for_recipe))
            .route("/steps/:slug/:id", put(Self::handle_update))
            .route("/steps/:slug/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /step - Add a step to a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewStep>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        UniquenessGuard::require_recipe(tx.executor()?, body.recipe_id).await?;
        UniquenessGuard::check_step(tx.executor()?, body.recipe_id, body.step_number, None).await?;
        let step = StepRepository::create(tx.executor()?, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::CREATED, Json(step)).into_response())
    }

    /// Handle GET /steps/:slug - Steps of one recipe by ascending position
    async fn handle_list_for_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let mut conn = resources.database.acquire().await?;

        let recipe = RecipeRepository::require_by_slug(&mut conn, &slug).await?;
        let steps = StepRepository::list_for_recipe(&mut conn, recipe.id).await?;

        Ok((StatusCode::OK, Json(steps)).into_response())
    }

    /// Handle PUT /steps/:slug/:id - Merge the provided fields into a step
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
        Json(body): Json<StepUpdate>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        let current = Self::require_owned(tx.executor()?, &slug, id).await?;

        if let Some(step_number) = body.step_number {
            UniquenessGuard::check_step(tx.executor()?, current.recipe_id, step_number, Some(id))
                .await?;
        }

        let step = StepRepository::update(tx.executor()?, &current, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::OK, Json(step)).into_response())
    }

    /// Handle DELETE /steps/:slug/:id - Remove a step
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        Self::require_owned(tx.executor()?, &slug, id).await?;
        StepRepository::delete(tx.executor()?, id).await?;
        tx.commit().await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn require_owned(conn: &mut SqliteConnection, slug: &str, id: i64) -> AppResult<Step> {
        let recipe = RecipeRepository::require_by_slug(conn, slug).await?;
        StepRepository::get_by_id(conn, id)
            .await?
            .filter(|step| step.recipe_id == recipe.id)
            .ok_or_else(|| AppError::not_found(messages::STEP_NOT_FOUND))
    }
}
