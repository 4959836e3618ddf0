//! Phone number models

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number owned by the account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: String,

    /// E.164 number
    pub number: String,

    /// Assistant answering calls to this number
    #[serde(default)]
    pub assistant_id: Option<String>,

    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /phone-numbers`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyPhoneNumberRequest {
    pub area_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
}

impl BuyPhoneNumberRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.area_code.len() != 3 || !self.area_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("areaCode", "must be three digits"));
        }
        Ok(())
    }
}

/// Body of `PUT /phone-numbers/{id}`; `None` detaches the number
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPhoneNumberRequest {
    pub assistant_id: Option<String>,
}
