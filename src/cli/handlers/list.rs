//! Generic list command handler
//!
//! Most list commands follow the same flow:
//! 1. Enter the route (session check)
//! 2. Fetch the collection
//! 3. Convert to the display type
//! 4. Print

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::cli::args::GlobalOptions;
use crate::client::CallOpsClient;
use crate::client::models::Ack;
use crate::error::Result;
use crate::notify::Notice;
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::session::Route;

/// Run a standard list command.
///
/// # Type Parameters
///
/// * `T` - The API model type returned by the fetcher (e.g., `Assistant`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
///
/// # Example
///
/// ```ignore
/// run_list_command::<Assistant, AssistantDisplay, _, _>(
///     opts,
///     Route::Assistants,
///     "assistants",
///     |client| async move { client.list_assistants().await },
/// ).await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    route: Route,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<CallOpsClient>) -> Fut,
{
    let ctx = CommandContext::enter(opts, route).await?;

    debug!("Fetching {}", resource_name);
    let items = fetcher(ctx.client.clone()).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)
}

/// Print the notice for a completed mutation, plus the raw ack for `--format json`
pub fn print_ack(ack: &Ack, fallback: &str, format: OutputFormat) -> Result<()> {
    Notice::from_ack(ack, fallback).print();
    if format == OutputFormat::Json {
        println!("{}", format_json(ack)?);
    }
    Ok(())
}
