//! Call log and usage reports

use std::sync::Arc;

use log::debug;

use crate::cli::args::{CallFilterArgs, GlobalOptions, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::CallRecord;
use crate::client::{PaginationParams, ReportApi, fetch_remaining_pages};
use crate::error::Result;
use crate::models::{CallDisplay, UsageDisplay};
use crate::output::Formattable;
use crate::output::formatters::format_cost;
use crate::output::json::format_json;
use crate::session::Route;

/// Pages fetched at once with `--all`
const MAX_CONCURRENT_PAGES: usize = 4;

/// Fetch the call log, all pages if asked, then apply local filters
pub async fn fetch_calls(
    api: Arc<dyn ReportApi>,
    filters: &CallFilterArgs,
    pagination: &PaginationArgs,
    page_size: usize,
) -> Result<Vec<CallRecord>> {
    let params = pagination.to_params(page_size, filters.filters_locally());
    let server_filters = filters.to_params();

    let first = api.list_calls(&params, &server_filters).await?;
    let remaining = first.remaining_pages();
    let mut calls = first.items;

    if pagination.all && !remaining.is_empty() {
        let size = params.effective_page_size();
        let rest = fetch_remaining_pages(
            remaining,
            move |page| {
                let api = api.clone();
                let f = server_filters.clone();
                async move {
                    let params = PaginationParams::new().page_size(size).page(page);
                    Ok(api.list_calls(&params, &f).await?.items)
                }
            },
            MAX_CONCURRENT_PAGES,
        )
        .await?;
        calls.extend(rest);
    }

    let fetched = calls.len();
    calls.retain(|call| filters.matches(call));
    debug!("{} of {} calls matched local filters", calls.len(), fetched);

    if let Some(limit) = pagination.limit {
        calls.truncate(limit);
    }
    Ok(calls)
}

pub async fn calls(
    opts: &GlobalOptions,
    filters: &CallFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Reports).await?;

    let api: Arc<dyn ReportApi> = ctx.client.clone();
    let calls = fetch_calls(api, filters, pagination, ctx.page_size()).await?;

    let rows: Vec<CallDisplay> = calls.into_iter().map(CallDisplay::from).collect();
    rows.print(ctx.format)
}

pub async fn usage(opts: &GlobalOptions, filters: &CallFilterArgs) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Reports).await?;
    let summary = ctx.client.usage_summary(&filters.to_params()).await?;

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&summary)?);
        return Ok(());
    }

    println!(
        "Calls: {}   Minutes: {:.1}   Cost: {}",
        summary.total_calls,
        summary.total_minutes,
        format_cost(Some(summary.total_cost))
    );
    println!();

    let rows: Vec<UsageDisplay> = summary
        .by_assistant
        .into_iter()
        .map(UsageDisplay::from)
        .collect();
    rows.print(ctx.format)
}
