//! Calendar-booking integration commands

use dialoguer::Password;
use dialoguer::theme::ColorfulTheme;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_ack;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::CalendarApi;
use crate::client::models::{Ack, CalendarIntegration};
use crate::error::{Result, ValidationError};
use crate::models::EventTypeDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::table::format_record;
use crate::session::Route;

fn prompt_api_key(api_key: Option<String>) -> Result<String> {
    match api_key {
        Some(key) => Ok(key),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Booking provider API key")
            .interact()?),
    }
}

/// Check the event type exists for this key, then save the integration
pub async fn connect_calendar(
    api: &dyn CalendarApi,
    api_key: String,
    event_type_id: String,
    timezone: String,
) -> Result<Ack> {
    if timezone.trim().is_empty() {
        return Err(ValidationError::new("timezone", "is required").into());
    }

    let lookup = api.lookup_event_types(&api_key).await?;
    if !lookup.event_types.iter().any(|e| e.id == event_type_id) {
        return Err(ValidationError::new(
            "eventTypeId",
            format!("{} is not one of this account's event types", event_type_id),
        )
        .into());
    }

    api.save_calendar_integration(&CalendarIntegration {
        api_key: Some(api_key),
        event_type_id,
        timezone,
    })
    .await
}

pub async fn event_types(opts: &GlobalOptions, api_key: Option<String>) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::CalendarIntegration).await?;
    let api_key = prompt_api_key(api_key)?;

    let lookup = ctx.client.lookup_event_types(&api_key).await?;
    if let Some(ref tz) = lookup.timezone {
        eprintln!("Account timezone: {}", tz);
    }

    let rows: Vec<EventTypeDisplay> = lookup
        .event_types
        .into_iter()
        .map(EventTypeDisplay::from)
        .collect();
    rows.print(ctx.format)
}

pub async fn connect(
    opts: &GlobalOptions,
    event_type: String,
    timezone: String,
    api_key: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::CalendarIntegration).await?;
    let api_key = prompt_api_key(api_key)?;

    let ack = connect_calendar(ctx.client.as_ref(), api_key, event_type, timezone).await?;
    print_ack(&ack, "Calendar connected", ctx.format)
}

pub async fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::CalendarIntegration).await?;
    let integration = ctx.client.get_calendar_integration().await?;

    match (ctx.format, integration) {
        (OutputFormat::Json, integration) => println!("{}", format_json(&integration)?),
        (OutputFormat::Table, None) => println!("No calendar connected."),
        (OutputFormat::Table, Some(integration)) => println!(
            "{}",
            format_record(&[
                ("EVENT TYPE", integration.event_type_id),
                ("TIMEZONE", integration.timezone),
                (
                    "API KEY",
                    if integration.api_key.is_some() {
                        "configured".to_string()
                    } else {
                        "hidden".to_string()
                    }
                ),
            ])
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCallOpsClient;
    use crate::error::Error;

    #[tokio::test]
    async fn test_unknown_event_type_is_not_saved() {
        let mock = MockCallOpsClient::new();

        let err = connect_calendar(
            &mock,
            "cal_live_key".to_string(),
            "evt-404".to_string(),
            "America/New_York".to_string(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(mock.call_count("save_calendar_integration").await, 0);
    }

    #[tokio::test]
    async fn test_blank_timezone_rejected() {
        let mock = MockCallOpsClient::new();
        let result = connect_calendar(
            &mock,
            "cal_live_key".to_string(),
            "evt-1".to_string(),
            " ".to_string(),
        )
        .await;

        assert!(result.is_err());
        assert!(mock.captured_requests().await.is_empty());
    }
}
