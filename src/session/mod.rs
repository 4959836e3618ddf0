//! Session ownership and single-flight token refresh
//!
//! [`SessionManager`] owns the access token. Requests ask it for a token with
//! [`SessionManager::valid_token`] and report a 401 with
//! [`SessionManager::refresh_after`]. However many requests fail at once,
//! only one refresh call is made; every caller waits on the same shared
//! future and observes the same outcome.

pub mod guard;
pub mod jwt;
pub mod route;
pub mod store;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use tokio::sync::{Mutex, RwLock};

use crate::error::{ApiError, Result};

pub use guard::{GuardDecision, RouteGuard, SessionValidator};
pub use route::{Requirement, Route};
pub use store::{ConfigTokenStore, MemoryTokenStore, TokenStore};

/// Tokens expiring sooner than this are refreshed before use
const EXPIRY_BUFFER_SECS: i64 = 30;

/// Access token plus the cookie that can mint the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_cookie: Option<String>,
}

/// Exchanges the refresh credential for a new access token
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> std::result::Result<Credentials, ApiError>;
}

type RefreshOutcome = std::result::Result<Credentials, ApiError>;
type SharedRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

struct Inner {
    token: RwLock<Option<String>>,
    inflight: Mutex<Option<SharedRefresh>>,
    refresher: Arc<dyn TokenRefresher>,
    store: Arc<dyn TokenStore>,
    refreshes: AtomicUsize,
    login_required: AtomicBool,
}

/// Owner of the session token. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Create a manager seeded from whatever the store already holds
    pub fn new(refresher: Arc<dyn TokenRefresher>, store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().map(|c| c.access_token);
        Self {
            inner: Arc::new(Inner {
                token: RwLock::new(token),
                inflight: Mutex::new(None),
                refresher,
                store,
                refreshes: AtomicUsize::new(0),
                login_required: AtomicBool::new(false),
            }),
        }
    }

    /// Current token without any refresh
    pub async fn token(&self) -> Option<String> {
        self.inner.token.read().await.clone()
    }

    /// Install credentials from a sign-in response
    pub async fn set_credentials(&self, credentials: Credentials) -> Result<()> {
        *self.inner.token.write().await = Some(credentials.access_token.clone());
        self.inner.login_required.store(false, Ordering::SeqCst);
        self.inner.store.save(&credentials)
    }

    /// Forget the session locally (logout)
    pub async fn clear(&self) -> Result<()> {
        *self.inner.token.write().await = None;
        self.inner.store.clear()
    }

    /// True once a refresh has failed; stays set until the next sign-in
    pub fn login_required(&self) -> bool {
        self.inner.login_required.load(Ordering::SeqCst)
    }

    /// Number of refresh calls issued by this manager
    pub fn refresh_count(&self) -> usize {
        self.inner.refreshes.load(Ordering::SeqCst)
    }

    /// Token to attach to the next request.
    ///
    /// Waits for an in-flight refresh if there is one, and refreshes ahead of
    /// time when the token is a JWT about to expire.
    pub async fn valid_token(&self) -> Result<String> {
        let pending = self.inner.inflight.lock().await.clone();
        if let Some(pending) = pending {
            return pending.await.map(|c| c.access_token).map_err(Into::into);
        }

        let buffer = chrono::Duration::seconds(EXPIRY_BUFFER_SECS);
        match self.token().await {
            Some(token) if jwt::expires_within(&token, buffer) => {
                debug!("Access token about to expire, refreshing early");
                self.refresh_after(Some(&token)).await
            }
            Some(token) => Ok(token),
            None if self.login_required() => Err(ApiError::SessionExpired.into()),
            None => Err(ApiError::LoginRequired.into()),
        }
    }

    /// Obtain a fresh token after a request made with `stale` got a 401.
    ///
    /// Joins the in-flight refresh if one exists. If the token has already
    /// moved past `stale`, the current token is returned without refreshing.
    pub async fn refresh_after(&self, stale: Option<&str>) -> Result<String> {
        let pending = {
            let mut inflight = self.inner.inflight.lock().await;
            match inflight.as_ref() {
                Some(pending) => {
                    debug!("Joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    if self.login_required() {
                        return Err(ApiError::SessionExpired.into());
                    }

                    let current = self.inner.token.read().await.clone();
                    if let Some(current) = current {
                        if stale != Some(current.as_str()) {
                            debug!("Token already refreshed, retrying with current token");
                            return Ok(current);
                        }
                    }

                    let pending = self.start_refresh();
                    *inflight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await.map(|c| c.access_token).map_err(Into::into)
    }

    fn start_refresh(&self) -> SharedRefresh {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.refreshes.fetch_add(1, Ordering::SeqCst);
            debug!("Refreshing access token");

            let outcome = match inner.refresher.refresh().await {
                Ok(credentials) => {
                    *inner.token.write().await = Some(credentials.access_token.clone());
                    if let Err(e) = inner.store.save_refreshed(&credentials) {
                        warn!("Failed to persist refreshed token: {}", e);
                    }
                    Ok(credentials)
                }
                Err(e) => {
                    warn!("Token refresh failed: {}", e);
                    *inner.token.write().await = None;
                    inner.login_required.store(true, Ordering::SeqCst);
                    if let Err(e) = inner.store.clear() {
                        warn!("Failed to clear stored session: {}", e);
                    }
                    Err(ApiError::SessionExpired)
                }
            };

            // Token is in place before the slot opens, so late 401s either
            // join this future or see the new token.
            inner.inflight.lock().await.take();
            outcome
        }
        .boxed()
        .shared()
    }
}
