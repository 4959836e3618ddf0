//! Admin commands: user list and impersonation
//!
//! Impersonation swaps the access token only. The admin's token is parked
//! in the config so `admin release` can put it back; the refresh cookie is
//! left alone, so a refresh during impersonation ends it.

use colored::Colorize;
use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::client::AdminApi;
use crate::client::models::AdminUser;
use crate::error::{ApiError, Error, Result};
use crate::models::AdminUserDisplay;
use crate::session::{Credentials, Route, SessionManager};

/// Swap in a token acting as `user_id`; returns the admin token it replaced
pub async fn begin_impersonation(
    api: &dyn AdminApi,
    session: &SessionManager,
    user_id: &str,
) -> Result<String> {
    let admin_token = session.token().await.ok_or(ApiError::LoginRequired)?;
    let minted = api.impersonate(user_id).await?;

    debug!("Switching session to user {}", user_id);
    session
        .set_credentials(Credentials {
            access_token: minted.access_token,
            refresh_cookie: None,
        })
        .await?;
    Ok(admin_token)
}

/// Put the parked admin token back
pub async fn end_impersonation(session: &SessionManager, admin_token: String) -> Result<()> {
    session
        .set_credentials(Credentials {
            access_token: admin_token,
            refresh_cookie: None,
        })
        .await
}

pub async fn users(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<AdminUser, AdminUserDisplay, _, _>(
        opts,
        Route::AdminDashboard,
        "users",
        |client| async move { client.list_users().await },
    )
    .await
}

pub async fn impersonate(opts: &GlobalOptions, user_id: &str) -> Result<()> {
    let mut ctx = CommandContext::enter(opts, Route::AdminDashboard).await?;

    if let Some(current) = ctx
        .config
        .session
        .as_ref()
        .and_then(|s| s.impersonating.clone())
    {
        return Err(Error::Other(format!(
            "Already acting as {}. Run `callops admin release` first.",
            current
        )));
    }

    let admin_token =
        begin_impersonation(ctx.client.as_ref(), ctx.client.session(), user_id).await?;
    ctx.session_changed().await;

    let config = ctx.reload_config()?;
    if let Some(session) = config.session.as_mut() {
        session.impersonating = Some(user_id.to_string());
        session.admin_token = Some(admin_token);
    }
    ctx.save_config()?;

    eprintln!(
        "{} Now acting as {}. Run `callops admin release` to stop.",
        "✓".green(),
        user_id.bold()
    );
    Ok(())
}

pub async fn release(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::enter(opts, Route::Dashboard).await?;

    let parked = ctx
        .config
        .session
        .as_ref()
        .and_then(|s| s.impersonating.clone().zip(s.admin_token.clone()));
    let Some((user_id, admin_token)) = parked else {
        return Err(Error::Other("Not impersonating anyone.".to_string()));
    };

    end_impersonation(ctx.client.session(), admin_token).await?;
    ctx.session_changed().await;

    let config = ctx.reload_config()?;
    if let Some(session) = config.session.as_mut() {
        session.impersonating = None;
        session.admin_token = None;
    }
    ctx.save_config()?;

    eprintln!("{} Stopped acting as {}", "✓".green(), user_id);
    Ok(())
}
