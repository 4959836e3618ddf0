//! Platform backend API client

pub mod api;
pub mod callops;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod rate_limit;

pub use api::{
    AdminApi, AssistantApi, AuthApi, CalendarApi, DocumentApi, PaymentApi, PhoneApi, ReportApi,
};
pub use callops::CallOpsClient;
#[cfg(test)]
pub use mock::MockCallOpsClient;
pub use pagination::{CallFilterParams, MAX_PAGE_SIZE, PagedResponse, PaginationParams};
pub use parallel::fetch_remaining_pages;

/// Everything the backend offers, in one trait object
pub trait CallOpsApi:
    AuthApi + AssistantApi + PhoneApi + DocumentApi + PaymentApi + CalendarApi + ReportApi + AdminApi
{
}

impl<T> CallOpsApi for T where
    T: AuthApi
        + AssistantApi
        + PhoneApi
        + DocumentApi
        + PaymentApi
        + CalendarApi
        + ReportApi
        + AdminApi
{
}
