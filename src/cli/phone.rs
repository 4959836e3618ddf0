//! Phone number commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::assistant::set_forwarding;
use crate::cli::confirm::{Confirmer, confirm_then};
use crate::cli::handlers::{print_ack, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::PhoneApi;
use crate::client::models::{Ack, AttachPhoneNumberRequest, BuyPhoneNumberRequest, PhoneNumber};
use crate::error::Result;
use crate::models::PhoneNumberDisplay;
use crate::output::json::format_json;
use crate::session::Route;

/// Release after confirmation; `None` if the operator declined
pub async fn release_number(
    api: &dyn PhoneApi,
    confirmer: &dyn Confirmer,
    id: &str,
) -> Result<Option<Ack>> {
    let label = api
        .list_phone_numbers()
        .await?
        .into_iter()
        .find(|n| n.id == id)
        .map(|n| n.number)
        .unwrap_or_else(|| id.to_string());

    let prompt = format!("Release {}? The number cannot be recovered.", label);
    confirm_then(confirmer, &prompt, || api.release_phone_number(id)).await
}

pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<PhoneNumber, PhoneNumberDisplay, _, _>(
        opts,
        Route::PhoneNumbers,
        "phone numbers",
        |client| async move { client.list_phone_numbers().await },
    )
    .await
}

pub async fn buy(opts: &GlobalOptions, area_code: String, assistant: Option<String>) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::PhoneNumbers).await?;

    let request = BuyPhoneNumberRequest {
        area_code,
        assistant_id: assistant,
    };
    request.validate()?;

    let number = ctx.client.buy_phone_number(&request).await?;
    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&number)?),
        OutputFormat::Table => {
            eprintln!("{} Purchased {} ({})", "✓".green(), number.number, number.id)
        }
    }
    Ok(())
}

pub async fn attach(opts: &GlobalOptions, id: &str, assistant: Option<String>) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::PhoneNumbers).await?;

    let fallback = if assistant.is_some() {
        "Phone number attached"
    } else {
        "Phone number detached"
    };
    let ack = ctx
        .client
        .attach_phone_number(id, &AttachPhoneNumberRequest { assistant_id: assistant })
        .await?;
    print_ack(&ack, fallback, ctx.format)
}

pub async fn forward(opts: &GlobalOptions, assistant: &str, number: Option<String>) -> Result<()> {
    let route = Route::AssistantEditor(Some(assistant.to_string()));
    let ctx = CommandContext::enter(opts, route).await?;

    let fallback = if number.is_some() {
        "Call forwarding updated"
    } else {
        "Call forwarding removed"
    };
    let ack = set_forwarding(ctx.client.as_ref(), assistant, number).await?;
    print_ack(&ack, fallback, ctx.format)
}

pub async fn release(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::PhoneNumbers).await?;
    let confirmer = ctx.confirmer();

    match release_number(ctx.client.as_ref(), confirmer.as_ref(), id).await? {
        Some(ack) => print_ack(&ack, "Phone number released", ctx.format),
        None => {
            eprintln!("Cancelled.");
            Ok(())
        }
    }
}
