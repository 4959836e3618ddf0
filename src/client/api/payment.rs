//! Payment API

use async_trait::async_trait;

use crate::client::models::{
    Ack, AddPaymentMethodRequest, PaymentMethod, PaymentReceipt, PaymentRequest,
};
use crate::error::Result;

#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>>;

    /// Attach a processor-tokenized payment method to the account
    async fn add_payment_method(&self, request: &AddPaymentMethodRequest) -> Result<Ack>;

    async fn set_default_payment_method(&self, id: &str) -> Result<Ack>;

    async fn delete_payment_method(&self, id: &str) -> Result<Ack>;

    /// One-off charge
    async fn pay(&self, request: &PaymentRequest) -> Result<PaymentReceipt>;
}
