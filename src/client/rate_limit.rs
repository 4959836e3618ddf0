//! Reactive per-endpoint rate limiting
//!
//! Nothing is throttled until the backend answers 429 for a category; from
//! then on requests in that category wait for the governor.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

/// Endpoint groups that share a rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointCategory {
    /// `/auth/*`
    Auth,
    /// `POST /documents` (uploads)
    Upload,
    /// `POST /payments`
    Payment,
    /// `/reports/*`
    Reports,
    /// Everything else
    Default,
}

impl EndpointCategory {
    pub const ALL: [EndpointCategory; 5] = [
        EndpointCategory::Auth,
        EndpointCategory::Upload,
        EndpointCategory::Payment,
        EndpointCategory::Reports,
        EndpointCategory::Default,
    ];

    /// Categorize a request by its API path (without base URL) and method
    pub fn from_request(path: &str, method: &reqwest::Method) -> Self {
        let path = path.strip_prefix("/api").unwrap_or(path);

        if path.starts_with("/auth/") {
            return EndpointCategory::Auth;
        }
        if path == "/documents" && *method == reqwest::Method::POST {
            return EndpointCategory::Upload;
        }
        if path == "/payments" && *method == reqwest::Method::POST {
            return EndpointCategory::Payment;
        }
        if path.starts_with("/reports") {
            return EndpointCategory::Reports;
        }
        EndpointCategory::Default
    }

    /// Requests per minute once limiting is active
    pub fn per_minute(&self) -> u32 {
        match self {
            EndpointCategory::Auth => 30,
            EndpointCategory::Upload => 12,
            EndpointCategory::Payment => 6,
            EndpointCategory::Reports => 240,
            EndpointCategory::Default => 120,
        }
    }
}

/// Limiter for one category, dormant until activated
pub struct EndpointRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    category: EndpointCategory,
}

impl EndpointRateLimiter {
    pub fn new(category: EndpointCategory) -> Self {
        let per_minute = NonZeroU32::new(category.per_minute()).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            active: AtomicBool::new(false),
            category,
        }
    }

    pub fn activate(&self) {
        if !self.active.swap(true, Ordering::SeqCst) {
            debug!("Rate limiting activated for {:?}", self.category);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.category);
            self.limiter.until_ready().await;
        }
    }
}

/// One limiter per category
pub struct RateLimiterSet {
    limiters: HashMap<EndpointCategory, EndpointRateLimiter>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    pub fn new() -> Self {
        let limiters = EndpointCategory::ALL
            .into_iter()
            .map(|category| (category, EndpointRateLimiter::new(category)))
            .collect();
        Self { limiters }
    }

    pub async fn wait_for(&self, category: EndpointCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.wait_if_active().await;
        }
    }

    /// Called when a request in `category` got a 429
    pub fn activate(&self, category: EndpointCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.activate();
        }
    }

    pub fn is_active(&self, category: EndpointCategory) -> bool {
        self.limiters
            .get(&category)
            .is_some_and(EndpointRateLimiter::is_active)
    }
}
