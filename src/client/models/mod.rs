//! Backend API data models
//!
//! Types returned by and sent to the platform backend, organized by
//! resource. All wire names are camelCase.

mod admin;
mod assistant;
mod auth;
mod calendar;
mod document;
mod envelope;
mod payment;
mod phone;
mod report;

pub use admin::{AdminUser, ImpersonateRequest};
pub use assistant::{
    Assistant, AssistantDraft, AssistantUpdateRequest, ModelConfig, VoiceConfig,
};
pub use auth::{
    ForgotPasswordRequest, ResetPasswordRequest, SessionUser, SignInRequest, SignInResponse,
    SignUpRequest, TokenResponse,
};
pub use calendar::{CalendarIntegration, EventType, EventTypeLookup};
pub use document::Document;
pub use envelope::Ack;
pub use payment::{AddPaymentMethodRequest, Amount, PaymentMethod, PaymentReceipt, PaymentRequest};
pub use phone::{AttachPhoneNumberRequest, BuyPhoneNumberRequest, PhoneNumber};
pub use report::{AssistantUsage, CallRecord, CallReportPage, UsageSummary};
