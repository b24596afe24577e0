// ABOUTME: Store-level tests for the uniqueness guard and the UNIQUE constraint backstop
// ABOUTME: Exercises AND/OR predicates, self-exclusion on update, bypassing writes, and concurrent writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use recipe_catalogue_server::database::{
    IngredientRepository, RecipeCategoryRepository, RecipeRepository, StepRepository,
    UniquenessGuard,
};
use recipe_catalogue_server::errors::{AppError, ErrorCode};
use recipe_catalogue_server::models::{NewIngredient, NewRecipe, NewStep};

fn soup() -> NewRecipe {
    NewRecipe {
        title: "Soup".to_owned(),
        description: None,
        slug: "soup".to_owned(),
    }
}

fn salt(recipe_id: i64) -> NewIngredient {
    NewIngredient {
        name: "Salt".to_owned(),
        amount: "1".to_owned(),
        measurement: Some("tsp".to_owned()),
        recipe_id,
    }
}

// ============================================================================
// Recipe title OR slug
// ============================================================================

#[tokio::test]
async fn test_recipe_check_matches_title_or_slug() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let mut conn = resources.database.acquire().await.unwrap();

    let err = UniquenessGuard::check_recipe(&mut conn, "Soup", "fresh", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.message, "Recipe with this title exists");

    let err = UniquenessGuard::check_recipe(&mut conn, "Fresh", "soup", None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Recipe with this slug exists");

    UniquenessGuard::check_recipe(&mut conn, "Fresh", "fresh", None)
        .await
        .unwrap();

    // A recipe never conflicts with itself
    UniquenessGuard::check_recipe(&mut conn, "Soup", "soup", Some(soup.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recipe_check_title_message_wins_over_slug() {
    let resources = common::create_test_resources().await;
    common::seed_recipe(&resources, "Soup", "soup").await;
    common::seed_recipe(&resources, "Stew", "stew").await;
    let mut conn = resources.database.acquire().await.unwrap();

    // Title collides with one row, slug with another
    let err = UniquenessGuard::check_recipe(&mut conn, "Soup", "stew", None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Recipe with this title exists");
}

// ============================================================================
// Child entities: name/position AND recipe_id
// ============================================================================

#[tokio::test]
async fn test_ingredient_check_requires_both_name_and_recipe() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let stew = common::seed_recipe(&resources, "Stew", "stew").await;

    let mut tx = resources.database.begin().await.unwrap();
    let existing = IngredientRepository::create(tx.executor().unwrap(), &salt(soup.id))
        .await
        .unwrap();

    let err = UniquenessGuard::check_ingredient(tx.executor().unwrap(), "Salt", soup.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Ingredient exists for recipe ID");

    UniquenessGuard::check_ingredient(tx.executor().unwrap(), "Salt", stew.id, None)
        .await
        .unwrap();
    UniquenessGuard::check_ingredient(tx.executor().unwrap(), "Pepper", soup.id, None)
        .await
        .unwrap();
    UniquenessGuard::check_ingredient(tx.executor().unwrap(), "Salt", soup.id, Some(existing.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_step_and_link_checks_are_scoped_to_recipe() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let stew = common::seed_recipe(&resources, "Stew", "stew").await;
    let dinner = common::seed_category(&resources, "Dinner").await;

    let mut tx = resources.database.begin().await.unwrap();
    StepRepository::create(
        tx.executor().unwrap(),
        &NewStep {
            step_number: 1,
            step: "Boil water".to_owned(),
            recipe_id: soup.id,
        },
    )
    .await
    .unwrap();
    RecipeCategoryRepository::create(tx.executor().unwrap(), soup.id, dinner.id)
        .await
        .unwrap();

    assert!(UniquenessGuard::check_step(tx.executor().unwrap(), soup.id, 1, None)
        .await
        .is_err());
    assert!(UniquenessGuard::check_step(tx.executor().unwrap(), stew.id, 1, None)
        .await
        .is_ok());
    assert!(UniquenessGuard::check_step(tx.executor().unwrap(), soup.id, 2, None)
        .await
        .is_ok());

    let err = UniquenessGuard::check_recipe_category(tx.executor().unwrap(), soup.id, dinner.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Category exists for recipe ID");
    assert!(
        UniquenessGuard::check_recipe_category(tx.executor().unwrap(), stew.id, dinner.id, None)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_category_check() {
    let resources = common::create_test_resources().await;
    common::seed_category(&resources, "Dinner").await;
    let mut conn = resources.database.acquire().await.unwrap();

    let err = UniquenessGuard::check_category(&mut conn, "Dinner")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Category exists");
    UniquenessGuard::check_category(&mut conn, "dinner").await.unwrap();
}

#[tokio::test]
async fn test_require_recipe_reports_missing_parent() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let mut conn = resources.database.acquire().await.unwrap();

    let found = UniquenessGuard::require_recipe(&mut conn, soup.id).await.unwrap();
    assert_eq!(found.slug, "soup");

    let err = UniquenessGuard::require_recipe(&mut conn, soup.id + 100)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Recipe does not exist");
}

// ============================================================================
// Writes that race past the guard
// ============================================================================

#[tokio::test]
async fn test_unguarded_duplicate_recipe_maps_to_conflict_message() {
    let resources = common::create_test_resources().await;
    common::seed_recipe(&resources, "Soup", "soup").await;

    let mut tx = resources.database.begin().await.unwrap();
    let err = RecipeRepository::create(
        tx.executor().unwrap(),
        &NewRecipe {
            title: "Soup".to_owned(),
            description: None,
            slug: "soup-2".to_owned(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.message, "Recipe with this title exists");

    let err = RecipeRepository::create(
        tx.executor().unwrap(),
        &NewRecipe {
            title: "Soup 2".to_owned(),
            description: None,
            slug: "soup".to_owned(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.message, "Recipe with this slug exists");
}

#[tokio::test]
async fn test_unguarded_duplicate_child_maps_to_conflict_message() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;

    let mut tx = resources.database.begin().await.unwrap();
    IngredientRepository::create(tx.executor().unwrap(), &salt(soup.id))
        .await
        .unwrap();
    let err = IngredientRepository::create(tx.executor().unwrap(), &salt(soup.id))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.message, "Ingredient exists for recipe ID");
}

#[tokio::test]
async fn test_unguarded_child_of_missing_recipe_is_not_found() {
    let resources = common::create_test_resources().await;

    let mut tx = resources.database.begin().await.unwrap();
    let err = IngredientRepository::create(tx.executor().unwrap(), &salt(12345))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Recipe does not exist");
}

// ============================================================================
// Concurrent writers on a file database
// ============================================================================

#[tokio::test]
async fn test_overlapping_recipe_creates_yield_one_conflict() {
    let temp_dir = tempfile::tempdir().unwrap();
    let resources = common::create_file_test_resources(temp_dir.path()).await;

    let mut first = resources.database.begin().await.unwrap();
    UniquenessGuard::check_recipe(first.executor().unwrap(), "Soup", "soup", None)
        .await
        .unwrap();
    RecipeRepository::create(first.executor().unwrap(), &soup())
        .await
        .unwrap();

    // Second writer starts while the first still holds its transaction open
    let second = tokio::spawn({
        let resources = Arc::clone(&resources);
        async move {
            let mut tx = resources.database.begin().await?;
            UniquenessGuard::check_recipe(tx.executor()?, "Soup", "soup", None).await?;
            let recipe = RecipeRepository::create(tx.executor()?, &soup()).await?;
            tx.commit().await?;
            Ok::<_, AppError>(recipe)
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    first.commit().await.unwrap();

    let err = second.await.unwrap().unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.message, "Recipe with this title exists");
    assert_eq!(common::count_rows(&resources, "recipes").await, 1);
}

// ============================================================================
// Ingredient natural-key lookup
// ============================================================================

#[tokio::test]
async fn test_ingredient_by_name_returns_first_match_across_recipes() {
    let resources = common::create_test_resources().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let stew = common::seed_recipe(&resources, "Stew", "stew").await;

    let mut tx = resources.database.begin().await.unwrap();
    let first = IngredientRepository::create(tx.executor().unwrap(), &salt(stew.id))
        .await
        .unwrap();
    IngredientRepository::create(tx.executor().unwrap(), &salt(soup.id))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut conn = resources.database.acquire().await.unwrap();
    let found = IngredientRepository::get_by_name(&mut conn, "Salt")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.recipe_id, stew.id);

    let missing = IngredientRepository::get_by_name(&mut conn, "Pepper")
        .await
        .unwrap();
    assert!(missing.is_none());
}
