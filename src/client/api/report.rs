//! Reporting API

use async_trait::async_trait;

use crate::client::models::{CallRecord, UsageSummary};
use crate::client::pagination::{CallFilterParams, PagedResponse, PaginationParams};
use crate::error::Result;

#[async_trait]
pub trait ReportApi: Send + Sync {
    /// One page of the call log
    async fn list_calls(
        &self,
        pagination: &PaginationParams,
        filters: &CallFilterParams,
    ) -> Result<PagedResponse<CallRecord>>;

    /// Aggregated usage for the optional date range
    async fn usage_summary(&self, filters: &CallFilterParams) -> Result<UsageSummary>;
}
