//! Admin models

use serde::{Deserialize, Serialize};

/// Platform account as seen by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /admin/impersonate`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonateRequest {
    pub user_id: String,
}
