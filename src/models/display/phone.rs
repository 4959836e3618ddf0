//! Phone number display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::PhoneNumber;
use crate::output::formatters::{format_timestamp_local, or_dash};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PhoneNumberDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NUMBER")]
    pub number: String,

    #[tabled(rename = "ASSISTANT")]
    pub assistant: String,

    #[tabled(rename = "PROVIDER")]
    pub provider: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<PhoneNumber> for PhoneNumberDisplay {
    fn from(number: PhoneNumber) -> Self {
        Self {
            id: number.id,
            number: number.number,
            assistant: number
                .assistant_id
                .unwrap_or_else(|| "(unattached)".to_string()),
            provider: or_dash(number.provider.as_deref()),
            created: format_timestamp_local(number.created_at.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unattached_number() {
        let display = PhoneNumberDisplay::from(PhoneNumber {
            id: "pn-1".to_string(),
            number: "+15550100".to_string(),
            assistant_id: None,
            provider: None,
            created_at: None,
        });

        assert_eq!(display.assistant, "(unattached)");
        assert_eq!(display.provider, "-");
    }
}
