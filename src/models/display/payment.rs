//! Payment method display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::PaymentMethod;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PaymentMethodDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CARD")]
    pub card: String,

    #[tabled(rename = "EXPIRES")]
    pub expires: String,

    #[tabled(rename = "DEFAULT")]
    pub default: String,
}

impl From<PaymentMethod> for PaymentMethodDisplay {
    fn from(method: PaymentMethod) -> Self {
        let card = match method.last4.as_deref() {
            Some(last4) => format!("{} •••• {}", or_dash(method.brand.as_deref()), last4),
            None => or_dash(method.brand.as_deref()),
        };
        let expires = match (method.exp_month, method.exp_year) {
            (Some(m), Some(y)) => format!("{:02}/{}", m, y),
            _ => "-".to_string(),
        };

        Self {
            id: method.id,
            card,
            expires,
            default: if method.is_default { "yes" } else { "" }.to_string(),
        }
    }
}
