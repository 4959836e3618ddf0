//! Sign-in, sign-up, and password commands

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use log::warn;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_ack;
use crate::client::AuthApi;
use crate::client::models::{
    ForgotPasswordRequest, ResetPasswordRequest, SessionUser, SignInRequest, SignUpRequest,
};
use crate::error::Result;
use crate::notify::Notice;
use crate::output::print_record;
use crate::session::Route;
use crate::validate;

/// Validate credentials, sign in, and work out who we are
pub async fn sign_in(api: &dyn AuthApi, request: &SignInRequest) -> Result<SessionUser> {
    request.validate()?;
    let response = api.sign_in(request).await?;
    match response.user {
        Some(user) => Ok(user),
        None => api.validate_token().await,
    }
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?),
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut ctx = CommandContext::enter(opts, Route::Login).await?;

    let request = SignInRequest {
        email: prompt_email(email)?,
        password: prompt_password(password, false)?,
    };
    let user = sign_in(ctx.client.as_ref(), &request).await?;

    // The token store has already written the token; add who it belongs to
    let api_host = opts.api_host.clone();
    let config = ctx.reload_config()?;
    if api_host.is_some() {
        config.api_host = api_host;
    }
    if let Some(session) = config.session.as_mut() {
        session.email = Some(user.email.clone());
        session.role = user.role.clone();
        session.impersonating = None;
        session.admin_token = None;
    }
    ctx.save_config()?;
    ctx.session_changed().await;

    let role = if user.is_admin() { " (admin)" } else { "" };
    Notice::Success(format!("Signed in as {}{}", user.email, role)).print();
    Ok(())
}

pub async fn signup(
    opts: &GlobalOptions,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Signup).await?;

    let request = SignUpRequest {
        name,
        email,
        password: prompt_password(password, true)?,
    };
    request.validate()?;

    let ack = ctx.client.sign_up(&request).await?;
    print_ack(
        &ack,
        "Account created. Run `callops login` to sign in.",
        ctx.format,
    )
}

pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if ctx.config.session.is_none() {
        Notice::Success("Not signed in".to_string()).print();
        return Ok(());
    }

    match ctx.client.logout().await {
        Ok(ack) => print_ack(&ack, "Signed out", ctx.format)?,
        Err(e) => {
            warn!("Backend logout failed: {}", e);
            Notice::Success("Signed out locally".to_string()).print();
        }
    }
    ctx.session_changed().await;
    Ok(())
}

#[derive(Serialize)]
struct WhoAmI<'a> {
    #[serde(flatten)]
    user: &'a SessionUser,
    impersonating: Option<&'a str>,
}

pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Dashboard).await?;
    let user = ctx.client.validate_token().await?;
    let impersonating = ctx
        .config
        .session
        .as_ref()
        .and_then(|s| s.impersonating.as_deref());

    let mut rows = vec![
        ("EMAIL", user.email.clone()),
        ("NAME", user.name.clone().unwrap_or_else(|| "-".to_string())),
        ("ROLE", user.role.clone().unwrap_or_else(|| "user".to_string())),
    ];
    if let Some(target) = impersonating {
        rows.push(("IMPERSONATING", target.to_string()));
    }

    print_record(
        &rows,
        &WhoAmI {
            user: &user,
            impersonating,
        },
        ctx.format,
    )
}

pub async fn forgot_password(opts: &GlobalOptions, email: String) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::ResetPassword).await?;
    validate::email("email", &email)?;

    let ack = ctx
        .client
        .forgot_password(&ForgotPasswordRequest { email })
        .await?;
    print_ack(
        &ack,
        "If the account exists, a reset link is on its way",
        ctx.format,
    )
}

pub async fn reset_password(
    opts: &GlobalOptions,
    token: String,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::ResetPassword).await?;

    let request = ResetPasswordRequest {
        token,
        password: prompt_password(password, true)?,
    };
    request.validate()?;

    let ack = ctx.client.reset_password(&request).await?;
    print_ack(&ack, "Password updated", ctx.format)
}
