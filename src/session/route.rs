//! Routing surface and the session each route requires

use std::fmt;

/// Session state a route needs before it may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Runs regardless of session state; never validated
    Public,
    /// Needs a valid session
    LoggedIn,
    /// Needs a valid session with the admin role
    Admin,
    /// Only for visitors without a session (login, signup)
    LoggedOut,
}

/// Every screen the operator can reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Assistants,
    /// Editor for a new (`None`) or existing assistant
    AssistantEditor(Option<String>),
    PhoneNumbers,
    Documents,
    Payment,
    CalendarIntegration,
    Reports,
    Login,
    Signup,
    ResetPassword,
    AdminDashboard,
}

impl Route {
    /// URL path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Assistants => "/assistant".to_string(),
            Route::AssistantEditor(None) => "/assistant/createassistant".to_string(),
            Route::AssistantEditor(Some(id)) => format!("/assistant/createassistant?id={}", id),
            Route::PhoneNumbers => "/phone-numbers".to_string(),
            Route::Documents => "/documents".to_string(),
            Route::Payment => "/payment".to_string(),
            Route::CalendarIntegration => "/calendar-integration".to_string(),
            Route::Reports => "/reports".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            Route::Login | Route::Signup => Requirement::LoggedOut,
            Route::ResetPassword => Requirement::Public,
            Route::AdminDashboard => Requirement::Admin,
            _ => Requirement::LoggedIn,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
