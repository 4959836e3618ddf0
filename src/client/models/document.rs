//! Knowledge-base document models

use serde::{Deserialize, Serialize};

/// Uploaded knowledge-base document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,

    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub mime_type: Option<String>,

    /// Processing status reported by the backend
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}
