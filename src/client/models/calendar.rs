//! Calendar-booking integration models

use serde::{Deserialize, Serialize};

/// Event type offered by the booking provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: String,

    pub title: String,

    /// Length in minutes
    #[serde(default)]
    pub length: Option<u32>,

    #[serde(default)]
    pub slug: Option<String>,
}

/// Response of `POST /calendar/event-types`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeLookup {
    #[serde(default)]
    pub event_types: Vec<EventType>,

    /// Timezone configured on the provider account
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Persisted integration settings (`GET`/`PUT /calendar/integration`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarIntegration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub event_type_id: String,

    pub timezone: String,
}
