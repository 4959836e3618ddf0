//! Assistant display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Assistant;
use crate::output::formatters::{format_timestamp_local, or_dash};

/// Assistant display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AssistantDisplay {
    #[tabled(rename = "ASSISTANT ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// `provider/model`
    #[tabled(rename = "MODEL")]
    pub model: String,

    #[tabled(rename = "VOICE")]
    pub voice: String,

    #[tabled(rename = "FORWARDING")]
    pub forwarding: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<Assistant> for AssistantDisplay {
    fn from(assistant: Assistant) -> Self {
        Self {
            id: or_dash(assistant.id.as_deref()),
            name: assistant.name,
            model: assistant
                .model
                .map(|m| format!("{}/{}", m.provider, m.model))
                .unwrap_or_else(|| "-".to_string()),
            voice: assistant
                .voice
                .map(|v| format!("{}/{}", v.provider, v.voice_id))
                .unwrap_or_else(|| "-".to_string()),
            forwarding: or_dash(assistant.forwarding_phone_number.as_deref()),
            updated: format_timestamp_local(
                assistant
                    .updated_at
                    .as_deref()
                    .or(assistant.created_at.as_deref()),
            ),
        }
    }
}

/// Field/value rows for `assistant get`
pub fn assistant_detail_rows(assistant: &Assistant) -> Vec<(&'static str, String)> {
    let opt_num = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    vec![
        ("ID", or_dash(assistant.id.as_deref())),
        ("NAME", assistant.name.clone()),
        (
            "MODEL",
            assistant
                .model
                .as_ref()
                .map(|m| format!("{}/{}", m.provider, m.model))
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("TEMPERATURE", opt_num(assistant.temperature.map(|t| t.to_string()))),
        ("MAX TOKENS", opt_num(assistant.max_tokens.map(|t| t.to_string()))),
        (
            "VOICE",
            assistant
                .voice
                .as_ref()
                .map(|v| format!("{}/{}", v.provider, v.voice_id))
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("FIRST MESSAGE", or_dash(assistant.first_message.as_deref())),
        ("SYSTEM PROMPT", or_dash(assistant.system_prompt.as_deref())),
        ("END MESSAGE", or_dash(assistant.end_call_message.as_deref())),
        (
            "FORWARDING",
            or_dash(assistant.forwarding_phone_number.as_deref()),
        ),
    ]
}
