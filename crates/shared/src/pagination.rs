//! Offset pagination utilities.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not send a limit.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on page size; larger requests are clamped, not rejected.
pub const MAX_LIMIT: u32 = 100;

/// Query-string pagination parameters.
///
/// Both fields are optional; out-of-range values are clamped to sane
/// bounds so a hand-edited URL never produces an error page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// The effective 1-based page number.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// The effective page size, clamped to `[1, MAX_LIMIT]`.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Row offset for a SQL `OFFSET` clause.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PageInfo {
    /// Builds page metadata from the effective params and a total count.
    pub fn new(params: &PageParams, total_items: i64) -> Self {
        let limit = params.limit();
        let total_pages = if total_items <= 0 {
            0
        } else {
            (total_items + i64::from(limit) - 1) / i64::from(limit)
        };
        Self {
            page: params.page(),
            limit,
            total_items,
            total_pages,
        }
    }
}
