// ABOUTME: HTTP integration tests for ingredient routes
// ABOUTME: Covers per-recipe name uniqueness, parent resolution, and slug-scoped update/delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{http::StatusCode, Router};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn add_ingredient(app: &Router, recipe_id: i64, name: &str) -> Value {
    AxumTestRequest::post("/ingredient")
        .json(&json!({"name": name, "amount": "2", "measurement": "cups", "recipe_id": recipe_id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_create_ingredient_returns_stored_row() {
    let (app, resources) = common::create_test_app().await;
    let recipe = common::seed_recipe(&resources, "Soup", "soup").await;

    let ingredient = add_ingredient(&app, recipe.id, "Flour").await;

    assert!(ingredient["id"].as_i64().unwrap() > 0);
    assert_eq!(ingredient["name"], "Flour");
    assert_eq!(ingredient["amount"], "2");
    assert_eq!(ingredient["measurement"], "cups");
    assert_eq!(ingredient["recipe_id"], recipe.id);
}

#[tokio::test]
async fn test_duplicate_name_in_same_recipe_is_rejected() {
    let (app, resources) = common::create_test_app().await;
    let recipe = common::seed_recipe(&resources, "Soup", "soup").await;
    add_ingredient(&app, recipe.id, "Salt").await;

    let response = AxumTestRequest::post("/ingredient")
        .json(&json!({"name": "Salt", "amount": "1", "recipe_id": recipe.id}))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
    assert_eq!(body["error"]["message"], "Ingredient exists for recipe ID");
    assert_eq!(common::count_rows(&resources, "ingredients").await, 1);
}

#[tokio::test]
async fn test_same_name_across_recipes_is_allowed() {
    let (app, resources) = common::create_test_app().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let stew = common::seed_recipe(&resources, "Stew", "stew").await;

    add_ingredient(&app, soup.id, "Salt").await;
    add_ingredient(&app, stew.id, "Salt").await;

    assert_eq!(common::count_rows(&resources, "ingredients").await, 2);
}

#[tokio::test]
async fn test_unknown_recipe_id_is_not_found() {
    let (app, resources) = common::create_test_app().await;

    let response = AxumTestRequest::post("/ingredient")
        .json(&json!({"name": "Salt", "amount": "1", "recipe_id": 999}))
        .send(app)
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Recipe does not exist");
    assert_eq!(common::count_rows(&resources, "ingredients").await, 0);
}

#[tokio::test]
async fn test_ingredient_field_limits_are_enforced() {
    let (app, resources) = common::create_test_app().await;
    let recipe = common::seed_recipe(&resources, "Soup", "soup").await;

    let response = AxumTestRequest::post("/ingredient")
        .json(&json!({"name": "Salt", "amount": "123456", "recipe_id": recipe.id}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/ingredient")
        .json(&json!({"name": "   ", "amount": "1", "recipe_id": recipe.id}))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_list_and_per_recipe_lookup() {
    let (app, resources) = common::create_test_app().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    let stew = common::seed_recipe(&resources, "Stew", "stew").await;
    add_ingredient(&app, soup.id, "Salt").await;
    add_ingredient(&app, soup.id, "Pepper").await;
    add_ingredient(&app, stew.id, "Beef").await;

    let all: Vec<Value> = AxumTestRequest::get("/ingredient")
        .send(app.clone())
        .await
        .json();
    assert_eq!(all.len(), 3);

    let page: Vec<Value> = AxumTestRequest::get("/ingredient?skip=2")
        .send(app.clone())
        .await
        .json();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "Beef");

    let response = AxumTestRequest::get("/ingredient/soup").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let names: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["Salt", "Pepper"]);

    let response = AxumTestRequest::get("/ingredient/missing").send(app).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_merges_fields_and_checks_name() {
    let (app, resources) = common::create_test_app().await;
    let recipe = common::seed_recipe(&resources, "Soup", "soup").await;
    let salt = add_ingredient(&app, recipe.id, "Salt").await;
    add_ingredient(&app, recipe.id, "Pepper").await;
    let id = salt["id"].as_i64().unwrap();

    let response = AxumTestRequest::put(&format!("/ingredient/soup/{id}"))
        .json(&json!({"amount": "3"}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Salt");
    assert_eq!(updated["amount"], "3");
    assert_eq!(updated["measurement"], "cups");

    let response = AxumTestRequest::put(&format!("/ingredient/soup/{id}"))
        .json(&json!({"name": "Pepper"}))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Ingredient exists for recipe ID");
}

#[tokio::test]
async fn test_update_and_delete_are_scoped_by_recipe_slug() {
    let (app, resources) = common::create_test_app().await;
    let soup = common::seed_recipe(&resources, "Soup", "soup").await;
    common::seed_recipe(&resources, "Stew", "stew").await;
    let salt = add_ingredient(&app, soup.id, "Salt").await;
    let id = salt["id"].as_i64().unwrap();

    let response = AxumTestRequest::put(&format!("/ingredient/stew/{id}"))
        .json(&json!({"amount": "9"}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Ingredient does not exist");

    let response = AxumTestRequest::delete(&format!("/ingredient/stew/{id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    assert_eq!(common::count_rows(&resources, "ingredients").await, 1);

    let response = AxumTestRequest::delete(&format!("/ingredient/soup/{id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 204);
    assert_eq!(common::count_rows(&resources, "ingredients").await, 0);
}
