//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod admin;
mod assistant;
mod calendar;
mod document;
mod payment;
mod phone;
mod report;

pub use admin::AdminUserDisplay;
pub use assistant::{AssistantDisplay, assistant_detail_rows};
pub use calendar::EventTypeDisplay;
pub use document::DocumentDisplay;
pub use payment::PaymentMethodDisplay;
pub use phone::PhoneNumberDisplay;
pub use report::{CallDisplay, UsageDisplay};
