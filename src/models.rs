// ABOUTME: Catalogue entities, create/update payloads, and the recipe aggregate response
// ABOUTME: Payload validation enforces non-empty fields, column widths, and positive step numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalogue Models
//!
//! Stored entities carry their store-assigned `i64` id. Children reference
//! their recipe by `recipe_id` only; the [`RecipeAggregate`] owns its child
//! collections by value.
//!
//! Update payloads use merge semantics: a `Some` field overwrites the stored
//! value, a `None` field leaves it untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// Reject blank text and text longer than the column allows
fn check_text(field: &str, value: &str, max_chars: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

fn check_optional_text(field: &str, value: Option<&str>, max_chars: usize) -> AppResult<()> {
    value.map_or(Ok(()), |v| check_text(field, v, max_chars))
}

fn check_step_number(step_number: i64) -> AppResult<()> {
    if step_number < 1 {
        return Err(AppError::out_of_range("step_number must be a positive integer"));
    }
    Ok(())
}

// ================================================================================================
// Recipe
// ================================================================================================

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier
    pub id: i64,
    /// Globally unique title
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Globally unique external lookup key
    pub slug: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /recipe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Slug
    pub slug: String,
}

impl NewRecipe {
    /// Validate field presence and widths
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_text("title", &self.title, limits::RECIPE_TITLE_MAX)?;
        check_text("slug", &self.slug, limits::RECIPE_SLUG_MAX)?;
        check_optional_text(
            "description",
            self.description.as_deref(),
            limits::RECIPE_DESCRIPTION_MAX,
        )
    }
}

/// Body of `PUT /recipe/{slug}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description; a description cannot be cleared
    #[serde(default)]
    pub description: Option<String>,
    /// New slug
    #[serde(default)]
    pub slug: Option<String>,
}

impl RecipeUpdate {
    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_optional_text("title", self.title.as_deref(), limits::RECIPE_TITLE_MAX)?;
        check_optional_text("slug", self.slug.as_deref(), limits::RECIPE_SLUG_MAX)?;
        check_optional_text(
            "description",
            self.description.as_deref(),
            limits::RECIPE_DESCRIPTION_MAX,
        )
    }

    /// True when no field is provided
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.slug.is_none()
    }
}

// ================================================================================================
// Ingredient
// ================================================================================================

/// A stored ingredient, owned by one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Store-assigned identifier
    pub id: i64,
    /// Name, unique within its recipe
    pub name: String,
    /// Free-form magnitude such as `"2"` or `"1/2"`
    pub amount: String,
    /// Optional unit such as `"cups"`
    pub measurement: Option<String>,
    /// Owning recipe
    pub recipe_id: i64,
}

/// Body of `POST /ingredient`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIngredient {
    /// Name
    pub name: String,
    /// Amount
    pub amount: String,
    /// Optional unit
    #[serde(default)]
    pub measurement: Option<String>,
    /// Owning recipe
    pub recipe_id: i64,
}

impl NewIngredient {
    /// Validate field presence and widths
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_text("name", &self.name, limits::INGREDIENT_NAME_MAX)?;
        check_text("amount", &self.amount, limits::INGREDIENT_AMOUNT_MAX)?;
        check_optional_text(
            "measurement",
            self.measurement.as_deref(),
            limits::INGREDIENT_MEASUREMENT_MAX,
        )
    }
}

/// Body of `PUT /ingredient/{slug}/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdate {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New amount
    #[serde(default)]
    pub amount: Option<String>,
    /// New unit
    #[serde(default)]
    pub measurement: Option<String>,
}

impl IngredientUpdate {
    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_optional_text("name", self.name.as_deref(), limits::INGREDIENT_NAME_MAX)?;
        check_optional_text("amount", self.amount.as_deref(), limits::INGREDIENT_AMOUNT_MAX)?;
        check_optional_text(
            "measurement",
            self.measurement.as_deref(),
            limits::INGREDIENT_MEASUREMENT_MAX,
        )
    }
}

// ================================================================================================
// Step
// ================================================================================================

/// A stored preparation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Store-assigned identifier
    pub id: i64,
    /// Position within the recipe, unique per recipe
    pub step_number: i64,
    /// Instruction text
    pub step: String,
    /// Owning recipe
    pub recipe_id: i64,
}

/// Body of `POST /step`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStep {
    /// Position, must be positive
    pub step_number: i64,
    /// Instruction text
    pub step: String,
    /// Owning recipe
    pub recipe_id: i64,
}

impl NewStep {
    /// Validate the position and text
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a non-positive position and
    /// `InvalidInput` for blank or oversized text
    pub fn validate(&self) -> AppResult<()> {
        check_step_number(self.step_number)?;
        check_text("step", &self.step, limits::STEP_TEXT_MAX)
    }
}

/// Body of `PUT /steps/{slug}/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepUpdate {
    /// New position
    #[serde(default)]
    pub step_number: Option<i64>,
    /// New text
    #[serde(default)]
    pub step: Option<String>,
}

impl StepUpdate {
    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Same as [`NewStep::validate`] for each provided field
    pub fn validate(&self) -> AppResult<()> {
        if let Some(step_number) = self.step_number {
            check_step_number(step_number)?;
        }
        check_optional_text("step", self.step.as_deref(), limits::STEP_TEXT_MAX)
    }
}

// ================================================================================================
// Category and recipe links
// ================================================================================================

/// A stored category, independent of any recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier
    pub id: i64,
    /// Globally unique name
    pub name: String,
}

/// Body of `POST /category`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    /// Name
    pub name: String,
}

impl NewCategory {
    /// Validate the name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank or oversized name
    pub fn validate(&self) -> AppResult<()> {
        check_text("name", &self.name, limits::CATEGORY_NAME_MAX)
    }
}

/// Link between one recipe and one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCategory {
    /// Store-assigned identifier
    pub id: i64,
    /// Linked category
    pub category_id: i64,
    /// Linked recipe
    pub recipe_id: i64,
}

/// Query of `POST /category/{slug}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCategoryQuery {
    /// Name of an existing category
    pub category_name: String,
}

/// Body of `PUT /category/{slug}/{id}`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecipeCategoryUpdate {
    /// Category to point the link at
    #[serde(default)]
    pub category_id: Option<i64>,
}

// ================================================================================================
// Aggregate
// ================================================================================================

/// A recipe together with everything it owns
///
/// Serializes flat: the recipe's own fields followed by `ingredients`,
/// `steps` (ascending `step_number`) and `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeAggregate {
    /// Scalar recipe fields
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Ingredients in insertion order
    pub ingredients: Vec<Ingredient>,
    /// Steps ordered by position
    pub steps: Vec<Step>,
    /// Category links in insertion order
    pub categories: Vec<RecipeCategory>,
}

impl RecipeAggregate {
    /// Aggregate for a recipe that owns nothing yet
    #[must_use]
    pub const fn empty(recipe: Recipe) -> Self {
        Self {
            recipe,
            ingredients: Vec::new(),
            steps: Vec::new(),
            categories: Vec::new(),
        }
    }
}
