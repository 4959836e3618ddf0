//! Calendar event type display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::EventType;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EventTypeDisplay {
    #[tabled(rename = "EVENT TYPE ID")]
    pub id: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "LENGTH")]
    pub length: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,
}

impl From<EventType> for EventTypeDisplay {
    fn from(event: EventType) -> Self {
        Self {
            id: event.id,
            title: event.title,
            length: event
                .length
                .map(|m| format!("{} min", m))
                .unwrap_or_else(|| "-".to_string()),
            slug: or_dash(event.slug.as_deref()),
        }
    }
}
