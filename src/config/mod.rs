//! Configuration management for CallOps
//!
//! The config file plays the role browser local storage plays for the web
//! dashboard: it holds the access token, the refresh cookie, the cached role
//! flag and the admin impersonation marker.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default backend host
pub const DEFAULT_API_HOST: &str = "https://api.callops.app";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend host override (the `/api` prefix is appended by the client)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Signed-in session state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<StoredSession>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Session state persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token attached to every authenticated request
    pub access_token: String,

    /// Raw `name=value` cookie pairs carrying the refresh credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_cookie: Option<String>,

    /// Signed-in account email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Cached role flag (`admin` or `user`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// User id an admin is currently impersonating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impersonating: Option<String>,

    /// The admin's own token, restored when impersonation ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

impl StoredSession {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default page size for report requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    100
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".callops").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Token material lives in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Backend host: explicit override > config file > default
    pub fn api_host(&self, override_host: Option<&str>) -> String {
        override_host
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }

    /// Email of the signed-in account, if any
    pub fn signed_in_email(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_host.is_none());
        assert!(config.session.is_none());
        assert_eq!(config.preferences.page_size, 100);
    }

    #[test]
    fn test_api_host_precedence() {
        let mut config = Config::default();
        assert_eq!(config.api_host(None), DEFAULT_API_HOST);

        config.api_host = Some("http://from-file".to_string());
        assert_eq!(config.api_host(None), "http://from-file");
        assert_eq!(config.api_host(Some("http://flag")), "http://flag");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_host: Some("http://localhost:8000".to_string()),
            session: Some(StoredSession {
                access_token: "tok".to_string(),
                refresh_cookie: Some("refresh_token=abc".to_string()),
                email: Some("ops@example.com".to_string()),
                role: Some("admin".to_string()),
                impersonating: None,
                admin_token: None,
            }),
            preferences: Preferences::default(),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_host.as_deref(), Some("http://localhost:8000"));
        assert_eq!(loaded.session, config.session);
        assert_eq!(loaded.signed_in_email(), Some("ops@example.com"));
        assert!(loaded.session.unwrap().is_admin());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(Config::load_from(&path).is_err());

        let path_str = path.to_string_lossy().to_string();
        let config = Config::load_or_default(Some(&path_str)).unwrap();
        assert!(config.session.is_none());
    }
}
