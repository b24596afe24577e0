// ABOUTME: Application constants for the recipe catalogue: field limits, defaults, messages
// ABOUTME: Pure data constants organized by domain, shared by validation and the SQLite schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Service identity
pub mod service_names {
    /// Service name used in structured logs
    pub const RECIPE_CATALOGUE_SERVER: &str = "recipe-catalogue-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Defaults applied when the environment is silent
pub mod defaults {
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/recipes.db";
    /// Default pool size for file-backed databases
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Default CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Column widths of the catalogue schema, in characters
pub mod limits {
    /// Recipe title
    pub const RECIPE_TITLE_MAX: usize = 80;
    /// Recipe slug
    pub const RECIPE_SLUG_MAX: usize = 100;
    /// Recipe description
    pub const RECIPE_DESCRIPTION_MAX: usize = 200;
    /// Ingredient name
    pub const INGREDIENT_NAME_MAX: usize = 20;
    /// Ingredient amount
    pub const INGREDIENT_AMOUNT_MAX: usize = 5;
    /// Ingredient measurement
    pub const INGREDIENT_MEASUREMENT_MAX: usize = 15;
    /// Step text
    pub const STEP_TEXT_MAX: usize = 200;
    /// Category name
    pub const CATEGORY_NAME_MAX: usize = 80;
}

/// Offset pagination bounds
pub mod pagination {
    /// Rows returned when the caller gives no `limit`
    pub const DEFAULT_LIMIT: u32 = 100;
    /// Upper bound applied to any requested `limit`
    pub const MAX_LIMIT: u32 = 1000;
}

/// Messages returned to API callers
pub mod messages {
    /// Recipe title conflict
    pub const RECIPE_TITLE_EXISTS: &str = "Recipe with this title exists";
    /// Recipe slug conflict
    pub const RECIPE_SLUG_EXISTS: &str = "Recipe with this slug exists";
    /// Ingredient (name, recipe) conflict
    pub const INGREDIENT_EXISTS: &str = "Ingredient exists for recipe ID";
    /// Category name conflict
    pub const CATEGORY_EXISTS: &str = "Category exists";
    /// Recipe-category pair conflict
    pub const RECIPE_CATEGORY_EXISTS: &str = "Category exists for recipe ID";
    /// Step (recipe, number) conflict
    pub const STEP_EXISTS: &str = "Step exists for recipe ID";
    /// Unknown recipe
    pub const RECIPE_NOT_FOUND: &str = "Recipe does not exist";
    /// Unknown category
    pub const CATEGORY_NOT_FOUND: &str = "Category does not exist";
    /// Unknown ingredient
    pub const INGREDIENT_NOT_FOUND: &str = "Ingredient does not exist";
    /// Unknown step
    pub const STEP_NOT_FOUND: &str = "Step does not exist";
    /// Unknown recipe-category link
    pub const RECIPE_CATEGORY_NOT_FOUND: &str = "Category link does not exist";
}
