//! Command execution context
//!
//! Loads the config, builds the client around the stored session, and runs
//! the route guard before a command touches the backend.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::confirm::{Confirmer, confirmer_for};
use crate::client::CallOpsClient;
use crate::config::Config;
use crate::error::{ApiError, Error, Result};
use crate::session::{ConfigTokenStore, GuardDecision, Requirement, Route, RouteGuard};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Config as loaded at startup; reload before saving if the session changed
    pub config: Config,
    pub config_path: PathBuf,
    /// Arc-wrapped so report pages can be fetched in parallel
    pub client: Arc<CallOpsClient>,
    pub format: OutputFormat,
    pub yes: bool,
    guard: RouteGuard,
}

impl CommandContext {
    /// Build a context without checking the session
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(opts.config_ref())?;

        let host = config.api_host(opts.api_host_ref());
        debug!("Using API host {}", host);

        let store = Arc::new(ConfigTokenStore::new(config_path.clone()));
        let client = Arc::new(CallOpsClient::new(&host, store)?);

        let format = opts
            .format
            .or_else(|| OutputFormat::from_preference(config.preferences.format.as_deref()))
            .unwrap_or_default();

        Ok(Self {
            config,
            config_path,
            client,
            format,
            yes: opts.yes,
            guard: RouteGuard::new(),
        })
    }

    /// Build a context and make sure `route` may be entered
    pub async fn enter(opts: &GlobalOptions, route: Route) -> Result<Self> {
        let ctx = Self::new(opts)?;
        ctx.require(&route).await?;
        Ok(ctx)
    }

    /// Run the route guard, turning a redirect into the matching error
    pub async fn require(&self, route: &Route) -> Result<()> {
        match self.guard.check(self.client.as_ref(), route).await {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(Route::Login) => Err(ApiError::LoginRequired.into()),
            GuardDecision::Redirect(_) if route.requirement() == Requirement::LoggedOut => {
                let email = self
                    .config
                    .signed_in_email()
                    .unwrap_or("another account")
                    .to_string();
                Err(Error::AlreadySignedIn(email))
            }
            GuardDecision::Redirect(_) => Err(ApiError::Forbidden.into()),
        }
    }

    /// Forget the guard's cached check after the session changed
    pub async fn session_changed(&self) {
        self.guard.invalidate().await;
    }

    /// Re-read the config file, picking up what the token store wrote
    pub fn reload_config(&mut self) -> Result<&mut Config> {
        let path = self.config_path.to_string_lossy().to_string();
        self.config = Config::load_or_default(Some(&path))?;
        Ok(&mut self.config)
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }

    pub fn confirmer(&self) -> Box<dyn Confirmer> {
        confirmer_for(self.yes)
    }

    /// Page size for report requests
    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size
    }
}
