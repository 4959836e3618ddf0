//! Display models for CLI output

pub mod display;

pub use display::{
    AdminUserDisplay, AssistantDisplay, CallDisplay, DocumentDisplay, EventTypeDisplay,
    PaymentMethodDisplay, PhoneNumberDisplay, UsageDisplay, assistant_detail_rows,
};
