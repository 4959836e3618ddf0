//! Admin-only API

use async_trait::async_trait;

use crate::client::models::{AdminUser, TokenResponse};
use crate::error::Result;

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<AdminUser>>;

    /// Mint a token acting as `user_id`
    async fn impersonate(&self, user_id: &str) -> Result<TokenResponse>;
}
