// ABOUTME: Route handlers for categories and the links between recipes and categories
// ABOUTME: Categories are global; links are created, listed, updated, and removed per recipe slug
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Category routes
//!
//! `POST /category` creates a category; `POST /category/:slug?category_name=`
//! links an existing category to a recipe.

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
    database::{CategoryRepository, RecipeCategoryRepository, RecipeRepository, UniquenessGuard},
    errors::{AppError, AppResult},
    models::{LinkCategoryQuery, NewCategory, RecipeCategory, RecipeCategoryUpdate},
    pagination::PageQuery,
    resources::ServerResources,
};

/// Category routes handler
pub struct CategoryRoutes;

impl CategoryRoutes {
    /// Create all category routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/category", get(Self::handle_list))
            .route("/category", post(Self::handle_create))
            .route("/category/:slug", get(Self::handle_list_for_recipe))
            .route("/category/:slug", post(Self::handle_link))
            .route("/category/:slug/:id", put(Self::handle_update_link))
            .route("/category/:slug/:id", delete(Self::handle_delete_link))
            .with_state(resources)
    }

    /// Handle GET /category - A page of categories
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page(query);
        let mut conn = resources.database.acquire().await?;

        let categories = CategoryRepository::list(&mut conn, page).await?;

        Ok((StatusCode::OK, Json(categories)).into_response())
    }

    /// Handle POST /category - Create a category
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewCategory>,
    ) -> Result<Response, AppError> {
        body.validate()?;

        let mut tx = resources.database.begin().await?;
        UniquenessGuard::check_category(tx.executor()?, &body.name).await?;
        let category = CategoryRepository::create(tx.executor()?, &body.name).await?;
        tx.commit().await?;

        Ok((StatusCode::CREATED, Json(category)).into_response())
    }

    /// Handle GET /category/:slug - Category links of one recipe
    async fn handle_list_for_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let mut conn = resources.database.acquire().await?;

        let recipe = RecipeRepository::require_by_slug(&mut conn, &slug).await?;
        let links = RecipeCategoryRepository::list_for_recipe(&mut conn, recipe.id).await?;

        Ok((StatusCode::OK, Json(links)).into_response())
    }

    /// Handle POST /category/:slug?category_name= - Link a category to a recipe
    async fn handle_link(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
        Query(query): Query<LinkCategoryQuery>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        let recipe = RecipeRepository::require_by_slug(tx.executor()?, &slug).await?;
        let category = CategoryRepository::require_by_name(tx.executor()?, &query.category_name).await?;

        UniquenessGuard::check_recipe_category(tx.executor()?, recipe.id, category.id, None).await?;
        let link = RecipeCategoryRepository::create(tx.executor()?, recipe.id, category.id).await?;
        tx.commit().await?;

        Ok((StatusCode::CREATED, Json(link)).into_response())
    }

    /// Handle PUT /category/:slug/:id - Point a link at another category
    async fn handle_update_link(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
        Json(body): Json<RecipeCategoryUpdate>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        let current = Self::require_owned(tx.executor()?, &slug, id).await?;

        if let Some(category_id) = body.category_id {
            CategoryRepository::get_by_id(tx.executor()?, category_id)
                .await?
                .ok_or_else(|| AppError::not_found(messages::CATEGORY_NOT_FOUND))?;
            UniquenessGuard::check_recipe_category(
                tx.executor()?,
                current.recipe_id,
                category_id,
                Some(id),
            )
            .await?;
        }

        let link = RecipeCategoryRepository::update(tx.executor()?, &current, &body).await?;
        tx.commit().await?;

        Ok((StatusCode::OK, Json(link)).into_response())
    }

    /// Handle DELETE /category/:slug/:id - Unlink a category from a recipe
    async fn handle_delete_link(
        State(resources): State<Arc<ServerResources>>,
        Path((slug, id)): Path<(String, i64)>,
    ) -> Result<Response, AppError> {
        let mut tx = resources.database.begin().await?;
        Self::require_owned(tx.executor()?, &slug, id).await?;
        RecipeCategoryRepository::delete(tx.executor()?, id).await?;
        tx.commit().await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn require_owned(
        conn: &mut SqliteConnection,
        slug: &str,
        id: i64,
    ) -> AppResult<RecipeCategory> {
        let recipe = RecipeRepository::require_by_slug(conn, slug).await?;
        RecipeCategoryRepository::get_by_id(conn, id)
            .await?
            .filter(|link| link.recipe_id == recipe.id)
            .ok_or_else(|| AppError::not_found(messages::RECIPE_CATEGORY_NOT_FOUND))
    }
}
