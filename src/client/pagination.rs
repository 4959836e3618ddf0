//! Pagination and filter helpers for report requests
//!
//! The call log is the only paginated collection. Pages are 1-indexed and
//! the first response carries `totalCount`, which is enough to schedule the
//! remaining pages up front.

use serde::{Deserialize, Serialize};

/// Largest page the backend will serve
pub const MAX_PAGE_SIZE: usize = 500;

/// Pagination parameters for API requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().page_size(100).page(2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    /// Number of items per page (default and cap: `MAX_PAGE_SIZE`)
    pub page_size: Option<usize>,
    /// Page number, starting at 1
    pub page: Option<usize>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Effective page size after defaulting and capping
    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Convert to `(key, value)` query pairs
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("pageSize", self.effective_page_size().to_string())];
        if let Some(page) = self.page {
            params.push(("page", page.max(1).to_string()));
        }
        params
    }
}

/// Server-side filters for the call log
#[derive(Debug, Clone, Default)]
pub struct CallFilterParams {
    pub assistant_id: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    pub to: Option<String>,
}

impl CallFilterParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref id) = self.assistant_id {
            params.push(("assistantId", id.clone()));
        }
        if let Some(ref from) = self.from {
            params.push(("from", from.clone()));
        }
        if let Some(ref to) = self.to {
            params.push(("to", to.clone()));
        }
        params
    }
}

/// One page of results plus what is needed to fetch the rest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total_count: Option<usize>,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, total_count: Option<usize>, page: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Total number of pages, if the backend reported a count
    pub fn page_count(&self) -> Option<usize> {
        self.total_count
            .map(|total| total.div_ceil(self.page_size.max(1)))
    }

    pub fn has_more_pages(&self) -> bool {
        self.page_count().is_some_and(|count| self.page < count)
    }

    /// Page numbers after this one
    pub fn remaining_pages(&self) -> Vec<usize> {
        match self.page_count() {
            Some(count) if self.page < count => ((self.page + 1)..=count).collect(),
            _ => Vec::new(),
        }
    }
}
