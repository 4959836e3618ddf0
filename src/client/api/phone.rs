//! Phone number API

use async_trait::async_trait;

use crate::client::models::{Ack, AttachPhoneNumberRequest, BuyPhoneNumberRequest, PhoneNumber};
use crate::error::Result;

#[async_trait]
pub trait PhoneApi: Send + Sync {
    async fn list_phone_numbers(&self) -> Result<Vec<PhoneNumber>>;

    /// Purchase a number in the requested area code
    async fn buy_phone_number(&self, request: &BuyPhoneNumberRequest) -> Result<PhoneNumber>;

    /// Point a number at an assistant, or detach it
    async fn attach_phone_number(&self, id: &str, request: &AttachPhoneNumberRequest)
    -> Result<Ack>;

    /// Give a number back to the carrier
    async fn release_phone_number(&self, id: &str) -> Result<Ack>;
}
