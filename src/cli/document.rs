//! Knowledge-base document commands

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use indicatif::ProgressBar;

use crate::cli::args::GlobalOptions;
use crate::cli::confirm::{Confirmer, confirm_then};
use crate::cli::handlers::{print_ack, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::DocumentApi;
use crate::client::models::{Ack, Document};
use crate::error::{Result, ValidationError};
use crate::models::DocumentDisplay;
use crate::output::json::format_json;
use crate::session::Route;

/// Largest file the backend accepts
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Read and upload one file
pub async fn upload_file(api: &dyn DocumentApi, path: &Path) -> Result<Document> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ValidationError::new("path", "must name a file"))?
        .to_string();

    let size = tokio::fs::metadata(path).await?.len();
    if size == 0 {
        return Err(ValidationError::new("file", "is empty").into());
    }
    if size > MAX_UPLOAD_BYTES as u64 {
        return Err(ValidationError::new("file", "is larger than 20 MB").into());
    }

    let contents = tokio::fs::read(path).await?;
    api.upload_document(&file_name, contents).await
}

/// Delete after confirmation; `None` if the operator declined
pub async fn delete_document(
    api: &dyn DocumentApi,
    confirmer: &dyn Confirmer,
    id: &str,
) -> Result<Option<Ack>> {
    let label = api
        .list_documents()
        .await?
        .into_iter()
        .find(|d| d.id == id)
        .map(|d| d.name)
        .unwrap_or_else(|| id.to_string());

    let prompt = format!("Delete document \"{}\"?", label);
    confirm_then(confirmer, &prompt, || api.delete_document(id)).await
}

pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Document, DocumentDisplay, _, _>(
        opts,
        Route::Documents,
        "documents",
        |client| async move { client.list_documents().await },
    )
    .await
}

pub async fn upload(opts: &GlobalOptions, path: &Path) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Documents).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Uploading {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = upload_file(ctx.client.as_ref(), path).await;
    spinner.finish_and_clear();

    let document = result?;
    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&document)?),
        OutputFormat::Table => eprintln!(
            "{} Uploaded \"{}\" ({})",
            "✓".green(),
            document.name,
            document.id
        ),
    }
    Ok(())
}

pub async fn delete(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Documents).await?;
    let confirmer = ctx.confirmer();

    match delete_document(ctx.client.as_ref(), confirmer.as_ref(), id).await? {
        Some(ack) => print_ack(&ack, "Document deleted", ctx.format),
        None => {
            eprintln!("Cancelled.");
            Ok(())
        }
    }
}
