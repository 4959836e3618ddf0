//! Authentication gate run before a route is entered

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;

use super::route::{Requirement, Route};
use crate::client::models::SessionUser;
use crate::error::Result;

/// Something that can tell whether the current session is valid
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate_session(&self) -> Result<SessionUser>;
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

#[derive(Debug, Clone)]
struct LastCheck {
    path: String,
    user: Option<SessionUser>,
}

/// Validates the session at most once per distinct path.
///
/// The last checked path and its outcome are remembered. The lock is held
/// across the validation call, so a check that overlaps another waits for
/// it instead of issuing its own request.
#[derive(Default)]
pub struct RouteGuard {
    last: Mutex<Option<LastCheck>>,
    validations: AtomicUsize,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `route` may be entered
    pub async fn check(&self, validator: &dyn SessionValidator, route: &Route) -> GuardDecision {
        let requirement = route.requirement();
        if requirement == Requirement::Public {
            return GuardDecision::Allow;
        }

        let user = self.user_for(validator, &route.path()).await;
        decide(requirement, user.as_ref())
    }

    /// Forget the last check; call after the session changes
    pub async fn invalidate(&self) {
        self.last.lock().await.take();
    }

    /// Number of validation requests issued
    pub fn validation_count(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }

    async fn user_for(&self, validator: &dyn SessionValidator, path: &str) -> Option<SessionUser> {
        let mut last = self.last.lock().await;
        if let Some(check) = last.as_ref().filter(|c| c.path == path) {
            debug!("Session already checked for {}", path);
            return check.user.clone();
        }

        self.validations.fetch_add(1, Ordering::SeqCst);
        let user = match validator.validate_session().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Session validation for {} failed: {}", path, e);
                None
            }
        };

        *last = Some(LastCheck {
            path: path.to_string(),
            user: user.clone(),
        });
        user
    }
}

fn decide(requirement: Requirement, user: Option<&SessionUser>) -> GuardDecision {
    match (requirement, user) {
        (Requirement::Public, _) => GuardDecision::Allow,
        (Requirement::LoggedIn, Some(_)) => GuardDecision::Allow,
        (Requirement::LoggedIn | Requirement::Admin, None) => GuardDecision::Redirect(Route::Login),
        (Requirement::Admin, Some(u)) if u.is_admin() => GuardDecision::Allow,
        (Requirement::Admin, Some(_)) => GuardDecision::Redirect(Route::Dashboard),
        (Requirement::LoggedOut, None) => GuardDecision::Allow,
        (Requirement::LoggedOut, Some(u)) if u.is_admin() => {
            GuardDecision::Redirect(Route::AdminDashboard)
        }
        (Requirement::LoggedOut, Some(_)) => GuardDecision::Redirect(Route::Dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingValidator {
        calls: AtomicUsize,
        user: Option<SessionUser>,
    }

    impl CountingValidator {
        fn signed_in(role: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                user: Some(SessionUser {
                    id: Some("user-1".to_string()),
                    email: "ops@example.com".to_string(),
                    name: None,
                    role: Some(role.to_string()),
                }),
            }
        }

        fn signed_out() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                user: None,
            }
        }
    }

    #[async_trait]
    impl SessionValidator for CountingValidator {
        async fn validate_session(&self) -> Result<SessionUser> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.user.clone().ok_or_else(|| ApiError::Unauthorized.into())
        }
    }

    #[tokio::test]
    async fn test_protected_route_allows_valid_session() {
        let guard = RouteGuard::new();
        let validator = CountingValidator::signed_in("user");

        let decision = guard.check(&validator, &Route::Assistants).await;
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[tokio::test]
    async fn test_protected_route_redirects_to_login() {
        let guard = RouteGuard::new();
        let validator = CountingValidator::signed_out();

        let decision = guard.check(&validator, &Route::Payment).await;
        assert_eq!(decision, GuardDecision::Redirect(Route::Login));
    }

    #[tokio::test]
    async fn test_login_route_redirects_signed_in_user() {
        let guard = RouteGuard::new();

        let user = CountingValidator::signed_in("user");
        assert_eq!(
            guard.check(&user, &Route::Login).await,
            GuardDecision::Redirect(Route::Dashboard)
        );

        let guard = RouteGuard::new();
        let admin = CountingValidator::signed_in("admin");
        assert_eq!(
            guard.check(&admin, &Route::Signup).await,
            GuardDecision::Redirect(Route::AdminDashboard)
        );

        let guard = RouteGuard::new();
        let visitor = CountingValidator::signed_out();
        assert_eq!(guard.check(&visitor, &Route::Login).await, GuardDecision::Allow);
    }

    #[tokio::test]
    async fn test_admin_route_requires_admin_role() {
        let guard = RouteGuard::new();
        let user = CountingValidator::signed_in("user");
        assert_eq!(
            guard.check(&user, &Route::AdminDashboard).await,
            GuardDecision::Redirect(Route::Dashboard)
        );

        let guard = RouteGuard::new();
        let admin = CountingValidator::signed_in("admin");
        assert_eq!(
            guard.check(&admin, &Route::AdminDashboard).await,
            GuardDecision::Allow
        );
    }

    #[tokio::test]
    async fn test_public_route_never_validates() {
        let guard = RouteGuard::new();
        let validator = CountingValidator::signed_out();

        assert_eq!(
            guard.check(&validator, &Route::ResetPassword).await,
            GuardDecision::Allow
        );
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_navigation_validates_once_per_path() {
        let guard = RouteGuard::new();
        let validator = CountingValidator::signed_in("user");

        for _ in 0..5 {
            guard.check(&validator, &Route::Documents).await;
        }
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);

        guard.check(&validator, &Route::Payment).await;
        guard.check(&validator, &Route::Payment).await;
        assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(guard.validation_count(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_checks_share_validation() {
        let guard = Arc::new(RouteGuard::new());
        let validator = Arc::new(CountingValidator::signed_in("user"));

        let checks: Vec<_> = (0..4)
            .map(|_| {
                let g = guard.clone();
                let v = validator.clone();
                tokio::spawn(async move { g.check(v.as_ref(), &Route::Reports).await })
            })
            .collect();

        for check in checks {
            assert_eq!(check.await.unwrap(), GuardDecision::Allow);
        }
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_check() {
        let guard = RouteGuard::new();
        let validator = CountingValidator::signed_in("user");

        guard.check(&validator, &Route::Dashboard).await;
        guard.invalidate().await;
        guard.check(&validator, &Route::Dashboard).await;

        assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
    }
}
