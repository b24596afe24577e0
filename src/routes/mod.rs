// ABOUTME: Route module organization for the recipe catalogue HTTP endpoints
// ABOUTME: Assembles the per-domain routers and applies request id, tracing, and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the recipe catalogue
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the entity store, guard, and aggregate reader.

/// Category and recipe-category link routes
pub mod categories;
/// Health check and readiness routes
pub mod health;
/// Ingredient routes
pub mod ingredients;
/// Recipe routes
pub mod recipes;
/// Step routes
pub mod steps;

pub use categories::CategoryRoutes;
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use steps::StepRoutes;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, record_response, request_id_middleware, setup_cors};
use crate::resources::ServerResources;

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(RecipeRoutes::routes(Arc::clone(resources)))
        .merge(IngredientRoutes::routes(Arc::clone(resources)))
        .merge(StepRoutes::routes(Arc::clone(resources)))
        .merge(CategoryRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(cors)
}
