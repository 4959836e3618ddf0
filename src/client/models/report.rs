//! Call and usage report models

use serde::{Deserialize, Serialize};

/// One call in the call log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: String,

    #[serde(default)]
    pub assistant_id: Option<String>,

    #[serde(default)]
    pub assistant_name: Option<String>,

    /// Remote party number
    #[serde(default)]
    pub customer_number: Option<String>,

    /// `queued`, `ringing`, `in-progress`, `ended`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub ended_reason: Option<String>,

    #[serde(default)]
    pub started_at: Option<String>,

    #[serde(default)]
    pub ended_at: Option<String>,

    #[serde(default)]
    pub duration_seconds: Option<u64>,

    /// Cost in account currency
    #[serde(default)]
    pub cost: Option<f64>,
}

/// One page of `GET /reports/calls`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallReportPage {
    #[serde(default)]
    pub calls: Vec<CallRecord>,

    #[serde(default)]
    pub total_count: Option<usize>,
}

/// Response of `GET /reports/usage`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    #[serde(default)]
    pub total_calls: u64,

    #[serde(default)]
    pub total_minutes: f64,

    #[serde(default)]
    pub total_cost: f64,

    #[serde(default)]
    pub by_assistant: Vec<AssistantUsage>,
}

/// Usage attributed to one assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantUsage {
    pub assistant_id: String,

    #[serde(default)]
    pub assistant_name: Option<String>,

    #[serde(default)]
    pub calls: u64,

    #[serde(default)]
    pub minutes: f64,

    #[serde(default)]
    pub cost: f64,
}
