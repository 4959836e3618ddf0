//! Calendar-booking integration API

use async_trait::async_trait;

use crate::client::models::{Ack, CalendarIntegration, EventTypeLookup};
use crate::error::Result;

#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Ask the booking provider (through the backend) for event types
    async fn lookup_event_types(&self, api_key: &str) -> Result<EventTypeLookup>;

    /// Current integration, `None` if never configured
    async fn get_calendar_integration(&self) -> Result<Option<CalendarIntegration>>;

    async fn save_calendar_integration(&self, integration: &CalendarIntegration) -> Result<Ack>;
}
