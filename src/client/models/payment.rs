//! Payment models
//!
//! Card details are tokenized by the payment processor before they reach
//! this client; only opaque payment-method ids are ever handled here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Saved payment method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub last4: Option<String>,

    #[serde(default)]
    pub exp_month: Option<u32>,

    #[serde(default)]
    pub exp_year: Option<u32>,

    #[serde(default)]
    pub is_default: bool,
}

/// Body of `POST /payment-methods`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentMethodRequest {
    pub payment_method_id: String,
}

impl AddPaymentMethodRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_payment_method_id(&self.payment_method_id)
    }
}

fn validate_payment_method_id(id: &str) -> Result<(), ValidationError> {
    let token = id.strip_prefix("pm_").unwrap_or("");
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new(
            "paymentMethodId",
            "must be a processor token like pm_1Nx... (card numbers are never accepted)",
        ));
    }
    Ok(())
}

/// Money amount in minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl FromStr for Amount {
    type Err = ValidationError;

    /// Parse `25`, `25.5` or `25.50` into cents
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::new("amount", "must be a positive amount like 25.00");

        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty()
            || frac.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(invalid)?;

        if cents == 0 {
            return Err(invalid());
        }
        Ok(Amount(cents))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Body of `POST /payments`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in cents
    pub amount: Amount,

    pub currency: String,

    /// Charge this method instead of the default one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
}

impl PaymentRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::new("currency", "must be an ISO 4217 code like usd"));
        }
        if let Some(ref id) = self.payment_method_id {
            validate_payment_method_id(id)?;
        }
        Ok(())
    }
}

/// Response of `POST /payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    #[serde(default)]
    pub payment_id: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,
}
