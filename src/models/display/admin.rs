//! Admin user display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::AdminUser;
use crate::output::formatters::{format_timestamp_local, or_dash};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AdminUserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "JOINED")]
    pub joined: String,
}

impl From<AdminUser> for AdminUserDisplay {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: or_dash(user.name.as_deref()),
            role: user.role.unwrap_or_else(|| "user".to_string()),
            joined: format_timestamp_local(user.created_at.as_deref()),
        }
    }
}
