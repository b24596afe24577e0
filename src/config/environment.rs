// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, database URLs, pagination bounds, and CORS origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, pagination, ports};
use crate::pagination::PageBounds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Environment type for logging and other deployment-dependent behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite { path: PathBuf },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` schemes or an empty path
    pub fn parse_url(s: &str) -> Result<Self> {
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:"));

        match path_str {
            Some(":memory:") => Ok(Self::Memory),
            Some("") => Err(anyhow::anyhow!("DATABASE_URL has an empty path: {s}")),
            Some(path) => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
            None if s.contains("://") => Err(anyhow::anyhow!(
                "Unsupported database URL (only sqlite: is supported): {s}"
            )),
            // Bare path: treat as SQLite file path
            None if !s.is_empty() => Ok(Self::SQLite {
                path: PathBuf::from(s),
            }),
            None => Err(anyhow::anyhow!("DATABASE_URL is empty")),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/recipes.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Pool size for file-backed databases (in-memory pools always use one)
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// In-memory database configuration, used by tests and benchmarks
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Offset pagination bounds for list endpoints
    pub pagination: PageBounds,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or if
    /// the resulting configuration fails [`Self::validate`]
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", defaults::HOST),
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
                max_connections: env_var_or(
                    "DATABASE_MAX_CONNECTIONS",
                    &defaults::DATABASE_MAX_CONNECTIONS.to_string(),
                )
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS value")?,
            },
            pagination: PageBounds {
                default_limit: env_var_or(
                    "DEFAULT_PAGE_LIMIT",
                    &pagination::DEFAULT_LIMIT.to_string(),
                )
                .parse()
                .context("Invalid DEFAULT_PAGE_LIMIT value")?,
                max_limit: env_var_or("MAX_PAGE_LIMIT", &pagination::MAX_LIMIT.to_string())
                    .parse()
                    .context("Invalid MAX_PAGE_LIMIT value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", defaults::CORS_ALLOWED_ORIGINS),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero pool size, a zero maximum page limit, or a
    /// default page limit above the maximum
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }

        if self.pagination.max_limit == 0 {
            return Err(anyhow::anyhow!("MAX_PAGE_LIMIT must be at least 1"));
        }

        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(anyhow::anyhow!(
                "DEFAULT_PAGE_LIMIT ({}) cannot exceed MAX_PAGE_LIMIT ({})",
                self.pagination.default_limit,
                self.pagination.max_limit
            ));
        }

        Ok(())
    }

    /// Configuration for tests: in-memory store, default bounds, ephemeral port
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: 0,
            environment: Environment::Testing,
            database: DatabaseConfig::in_memory(),
            pagination: PageBounds::default(),
            cors: CorsConfig {
                allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
            },
        }
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Catalogue Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Database: {} (max connections: {})\n\
             - Pagination: default {} / max {}\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.url,
            self.database.max_connections,
            self.pagination.default_limit,
            self.pagination.max_limit,
            self.cors.allowed_origins
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
