//! Payment commands
//!
//! Only processor tokens (`pm_...`) are accepted here. Card details are
//! entered on the processor's own page and never pass through this tool.

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::confirm::{Confirmer, confirm_then};
use crate::cli::handlers::{print_ack, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::PaymentApi;
use crate::client::models::{
    Ack, AddPaymentMethodRequest, Amount, PaymentMethod, PaymentReceipt, PaymentRequest,
};
use crate::error::Result;
use crate::models::PaymentMethodDisplay;
use crate::output::json::format_json;
use crate::session::Route;

/// Validate and confirm a charge before sending it
pub async fn pay(
    api: &dyn PaymentApi,
    confirmer: &dyn Confirmer,
    amount: &str,
    currency: &str,
    method: Option<String>,
) -> Result<Option<PaymentReceipt>> {
    let request = PaymentRequest {
        amount: amount.parse::<Amount>()?,
        currency: currency.to_ascii_lowercase(),
        payment_method_id: method,
    };
    request.validate()?;

    let target = request
        .payment_method_id
        .as_deref()
        .unwrap_or("the default payment method");
    let prompt = format!(
        "Charge {} {} to {}?",
        request.amount,
        request.currency.to_uppercase(),
        target
    );
    confirm_then(confirmer, &prompt, || api.pay(&request)).await
}

/// Remove after confirmation; `None` if the operator declined
pub async fn delete_method(
    api: &dyn PaymentApi,
    confirmer: &dyn Confirmer,
    id: &str,
) -> Result<Option<Ack>> {
    let prompt = format!("Remove payment method {}?", id);
    confirm_then(confirmer, &prompt, || api.delete_payment_method(id)).await
}

pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<PaymentMethod, PaymentMethodDisplay, _, _>(
        opts,
        Route::Payment,
        "payment methods",
        |client| async move { client.list_payment_methods().await },
    )
    .await
}

pub async fn add(opts: &GlobalOptions, payment_method_id: String) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Payment).await?;

    let request = AddPaymentMethodRequest { payment_method_id };
    request.validate()?;

    let ack = ctx.client.add_payment_method(&request).await?;
    print_ack(&ack, "Payment method added", ctx.format)
}

pub async fn set_default(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Payment).await?;
    let ack = ctx.client.set_default_payment_method(id).await?;
    print_ack(&ack, "Default payment method updated", ctx.format)
}

pub async fn delete(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Payment).await?;
    let confirmer = ctx.confirmer();

    match delete_method(ctx.client.as_ref(), confirmer.as_ref(), id).await? {
        Some(ack) => print_ack(&ack, "Payment method removed", ctx.format),
        None => {
            eprintln!("Cancelled.");
            Ok(())
        }
    }
}

pub async fn charge(
    opts: &GlobalOptions,
    amount: &str,
    currency: &str,
    method: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Payment).await?;
    let confirmer = ctx.confirmer();

    let Some(receipt) = pay(ctx.client.as_ref(), confirmer.as_ref(), amount, currency, method).await?
    else {
        eprintln!("Cancelled.");
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&receipt)?),
        OutputFormat::Table => {
            let message = receipt
                .detail
                .clone()
                .unwrap_or_else(|| "Payment received".to_string());
            let status = receipt.status.as_deref().unwrap_or("submitted");
            eprintln!("{} {} ({})", "✓".green(), message, status);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::confirm::testing::ScriptedConfirmer;
    use crate::client::MockCallOpsClient;
    use crate::error::Error;

    #[tokio::test]
    async fn test_pay_sends_cents() {
        let mock = MockCallOpsClient::new();
        let confirmer = ScriptedConfirmer::answering(true);

        pay(&mock, &confirmer, "25.5", "USD", None).await.unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({ "amount": 2550, "currency": "usd" }))
        );
        assert!(confirmer.prompts.lock().unwrap()[0].contains("25.50 USD"));
    }

    #[tokio::test]
    async fn test_bad_amount_rejected_before_prompt() {
        let mock = MockCallOpsClient::new();
        let confirmer = ScriptedConfirmer::answering(true);

        let err = pay(&mock, &confirmer, "10.005", "usd", None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(confirmer.prompts.lock().unwrap().is_empty());
        assert!(mock.captured_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_card_number_is_not_a_payment_method() {
        let mock = MockCallOpsClient::new();
        let confirmer = ScriptedConfirmer::answering(true);

        let result = pay(
            &mock,
            &confirmer,
            "10",
            "usd",
            Some("4242424242424242".to_string()),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(mock.call_count("pay").await, 0);
    }

    #[tokio::test]
    async fn test_cancelled_payment_issues_no_request() {
        let mock = MockCallOpsClient::new();
        let confirmer = ScriptedConfirmer::answering(false);

        assert!(
            pay(&mock, &confirmer, "10", "usd", None)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(mock.call_count("pay").await, 0);
    }
}
