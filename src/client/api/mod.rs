//! API trait definitions split by resource
//!
//! - [`AuthApi`] - sign-in, sign-up, logout, session validation, password reset
//! - [`AssistantApi`] - assistant CRUD
//! - [`PhoneApi`] - phone number purchase and attachment
//! - [`DocumentApi`] - knowledge-base documents
//! - [`PaymentApi`] - payment methods and one-off payments
//! - [`CalendarApi`] - calendar-booking integration
//! - [`ReportApi`] - call log and usage
//! - [`AdminApi`] - admin-only user management
//!
//! The [`CallOpsApi`](super::CallOpsApi) super-trait combines all of them.

mod admin;
mod assistant;
mod auth;
mod calendar;
mod document;
mod payment;
mod phone;
mod report;

pub use admin::AdminApi;
pub use assistant::AssistantApi;
pub use auth::AuthApi;
pub use calendar::CalendarApi;
pub use document::DocumentApi;
pub use payment::PaymentApi;
pub use phone::PhoneApi;
pub use report::ReportApi;
