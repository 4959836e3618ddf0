//! Persistence for session credentials

use std::path::PathBuf;
use std::sync::Mutex;

use log::debug;

use super::Credentials;
use crate::config::{Config, StoredSession};
use crate::error::Result;

/// Where the session manager mirrors its token.
///
/// Implementations are synchronous; writes are small and happen at most once
/// per refresh.
pub trait TokenStore: Send + Sync {
    /// Load previously saved credentials
    fn load(&self) -> Option<Credentials>;

    /// Persist new credentials, replacing the old ones
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Persist credentials minted by a token refresh.
    ///
    /// The refresh cookie always belongs to the signed-in account, so a
    /// refreshed token is never an impersonation token.
    fn save_refreshed(&self, credentials: &Credentials) -> Result<()> {
        self.save(credentials)
    }

    /// Remove all stored session state
    fn clear(&self) -> Result<()>;
}

/// Keeps credentials in memory only
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    pub fn new(initial: Option<Credentials>) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<Credentials> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(credentials.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = None;
        }
        Ok(())
    }
}

/// Mirrors credentials into the `session` block of the config file.
///
/// Fields the token store does not own (email, role, impersonation marker)
/// are preserved across saves.
pub struct ConfigTokenStore {
    path: PathBuf,
}

impl ConfigTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_config(&self) -> Result<Config> {
        let path = self.path.to_string_lossy().to_string();
        Config::load_or_default(Some(&path))
    }
}

impl TokenStore for ConfigTokenStore {
    fn load(&self) -> Option<Credentials> {
        let config = self.load_config().ok()?;
        config.session.map(|s| Credentials {
            access_token: s.access_token,
            refresh_cookie: s.refresh_cookie,
        })
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut config = self.load_config()?;
        let session = config.session.get_or_insert_with(StoredSession::default);
        session.access_token = credentials.access_token.clone();
        if credentials.refresh_cookie.is_some() {
            session.refresh_cookie = credentials.refresh_cookie.clone();
        }
        debug!("Saving session token to {}", self.path.display());
        config.save_to(&self.path)
    }

    fn save_refreshed(&self, credentials: &Credentials) -> Result<()> {
        let mut config = self.load_config()?;
        let session = config.session.get_or_insert_with(StoredSession::default);
        session.access_token = credentials.access_token.clone();
        if credentials.refresh_cookie.is_some() {
            session.refresh_cookie = credentials.refresh_cookie.clone();
        }
        if let Some(user_id) = session.impersonating.take() {
            debug!("Refresh ended impersonation of {}", user_id);
            session.admin_token = None;
        }
        config.save_to(&self.path)
    }

    fn clear(&self) -> Result<()> {
        let mut config = self.load_config()?;
        if config.session.take().is_some() {
            debug!("Clearing session from {}", self.path.display());
            config.save_to(&self.path)?;
        }
        Ok(())
    }
}
