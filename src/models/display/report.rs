//! Call log and usage display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{AssistantUsage, CallRecord};
use crate::output::formatters::{
    format_cost, format_duration_seconds, format_timestamp_local, or_dash,
};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CallDisplay {
    #[tabled(rename = "CALL ID")]
    pub id: String,

    #[tabled(rename = "ASSISTANT")]
    pub assistant: String,

    #[tabled(rename = "CUSTOMER")]
    pub customer: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "STARTED")]
    pub started: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,

    #[tabled(rename = "COST")]
    pub cost: String,
}

impl From<CallRecord> for CallDisplay {
    fn from(call: CallRecord) -> Self {
        let status = match (call.status.as_deref(), call.ended_reason.as_deref()) {
            (Some(status), Some(reason)) => format!("{} ({})", status, reason),
            (status, _) => or_dash(status),
        };

        Self {
            id: call.id,
            assistant: or_dash(
                call.assistant_name
                    .as_deref()
                    .or(call.assistant_id.as_deref()),
            ),
            customer: or_dash(call.customer_number.as_deref()),
            status,
            started: format_timestamp_local(call.started_at.as_deref()),
            duration: format_duration_seconds(call.duration_seconds),
            cost: format_cost(call.cost),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UsageDisplay {
    #[tabled(rename = "ASSISTANT")]
    pub assistant: String,

    #[tabled(rename = "CALLS")]
    pub calls: u64,

    #[tabled(rename = "MINUTES")]
    pub minutes: String,

    #[tabled(rename = "COST")]
    pub cost: String,
}

impl From<AssistantUsage> for UsageDisplay {
    fn from(usage: AssistantUsage) -> Self {
        Self {
            assistant: usage.assistant_name.unwrap_or(usage.assistant_id),
            calls: usage.calls,
            minutes: format!("{:.1}", usage.minutes),
            cost: format_cost(Some(usage.cost)),
        }
    }
}
