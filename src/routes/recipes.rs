// ABOUTME: Route handlers for recipes: list, lookup by slug, create, merge update, cascade delete
// ABOUTME: Every response body is a recipe aggregate with its ingredients, steps, and category links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! Reads go through the aggregate reader on a pooled connection. Writes run
//! the uniqueness guard and the store write in one request transaction.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::{
    database::{AggregateReader, RecipeRepository, UniquenessGuard},
    errors::AppError,
    models::{NewRecipe, RecipeAggregate, RecipeUpdate},
    pagination::PageQuery,
    resources::ServerResources,
};

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipe", get(Self::handle_list))
            .route("/recipe", post(Self::handle_create))
            .route("/recipe/:slug", get(Self::handle_get))
            .route("/recipe/:slug", put(Self::handle_update))
            .route("/recipe/:slug", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /recipe - A page of recipe aggregates, empty when the store is empty
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page(query);
        let mut conn = resources.database.acquire().await?;

        let aggregates = AggregateReader::load_page(&mut conn, page).await?;

        Ok((StatusCode::OK, Json(aggregates)).into_response())
    }

    /// Handle GET /recipe/:slug - One recipe aggregate
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let mut conn = resources.database.acquire().await?;

        let aggregate = AggregateReader::load_by_slug(&mut conn, &slug).await?;

        Ok((StatusCode::OK, Json(aggregate)).into_response())
    }

    /// Handle POST /recipe - Create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        UniquenessGuard::check_recipe(tx.executor()?, &body.title, &body.slug, None).await?;
        let recipe = RecipeRepository::create(tx.executor()?, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::CREATED, Json(RecipeAggregate::empty(recipe))).into_response())
    }

    /// Handle PUT /recipe/:slug - Merge the provided fields into a recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
        Json(body): Json<RecipeUpdate>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        let current = RecipeRepository::require_by_slug(tx.executor()?, &slug).await?;

        if body.title.is_some() || body.slug.is_some() {
            let title = body.title.as_deref().unwrap_or(&current.title);
            let new_slug = body.slug.as_deref().unwrap_or(&current.slug);
            UniquenessGuard::check_recipe(tx.executor()?, title, new_slug, Some(current.id))
                .await?;
        }

        let updated = RecipeRepository::update(tx.executor()?, &current, &body).await?;
        let aggregate = AggregateReader::assemble(tx.executor()?, updated).await?;
        tx.commit().await?;

        Ok((StatusCode::OK, Json(aggregate)).into_response())
    }

    /// Handle DELETE /recipe/:slug - Delete a recipe and everything it owns
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        let recipe = RecipeRepository::require_by_slug(tx.executor()?, &slug).await?;
        RecipeRepository::delete(tx.executor()?, recipe.id).await?;
        tx.commit().await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
