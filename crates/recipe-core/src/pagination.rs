// ABOUTME: Offset/limit pagination for list endpoints
// ABOUTME: Normalizes caller-supplied skip/limit against configured bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

/// Raw `?skip=&limit=` query parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    /// Rows to skip
    pub skip: Option<u32>,
    /// Rows to return
    pub limit: Option<u32>,
}

/// Bounds used to normalize a [`PageQuery`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageBounds {
    /// Limit used when the query has none
    pub default_limit: u32,
    /// Largest limit honored
    pub max_limit: u32,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// A normalized window over an ordered result set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Rows to skip
    pub skip: u32,
    /// Rows to return, never above the configured maximum
    pub limit: u32,
}

impl Page {
    /// Build a page from query parameters, clamping `limit` to `bounds.max_limit`
    #[must_use]
    pub fn from_query(query: PageQuery, bounds: PageBounds) -> Self {
        let limit = query
            .limit
            .unwrap_or(bounds.default_limit)
            .min(bounds.max_limit);

        Self {
            skip: query.skip.unwrap_or(0),
            limit,
        }
    }

    /// SQL `OFFSET` value
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    /// SQL `LIMIT` value
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::from_query(PageQuery::default(), PageBounds::default())
    }
}
