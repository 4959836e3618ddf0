//! Assistant API

use async_trait::async_trait;

use crate::client::models::{Ack, Assistant, AssistantUpdateRequest};
use crate::error::Result;

#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    async fn get_assistant(&self, id: &str) -> Result<Assistant>;

    async fn create_assistant(&self, request: &AssistantUpdateRequest) -> Result<Assistant>;

    async fn update_assistant(&self, id: &str, request: &AssistantUpdateRequest) -> Result<Ack>;

    async fn delete_assistant(&self, id: &str) -> Result<Ack>;
}
