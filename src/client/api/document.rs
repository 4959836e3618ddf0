//! Knowledge-base document API

use async_trait::async_trait;

use crate::client::models::{Ack, Document};
use crate::error::Result;

#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Multipart upload of one file
    async fn upload_document(&self, file_name: &str, contents: Vec<u8>) -> Result<Document>;

    async fn delete_document(&self, id: &str) -> Result<Ack>;
}
