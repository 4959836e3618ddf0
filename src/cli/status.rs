//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_API_HOST, StoredSession};
use crate::error::Result;
use crate::session::jwt;

/// Run the status command to display local session state
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "CallOps Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            match config.session {
                Some(ref session) => print_session(session),
                None => {
                    println!("{} Not signed in", "✗".red());
                    println!("  → Run 'callops login' to sign in");
                }
            }

            let host = config.api_host(opts.api_host_ref());
            if host != DEFAULT_API_HOST {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }

            if let Some(ref format) = config.preferences.format {
                println!("{} Default output format: {}", "○".dimmed(), format);
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!("Run {} to sign in.", "callops login".cyan());
            println!();
        }
    }

    Ok(())
}

fn print_session(session: &StoredSession) {
    let who = session.email.as_deref().unwrap_or("unknown account");
    if session.is_admin() {
        println!("{} Signed in as {} {}", "✓".green(), who.bold(), "(admin)".dimmed());
    } else {
        println!("{} Signed in as {}", "✓".green(), who.bold());
    }

    if let Some(ref user_id) = session.impersonating {
        println!("{} Acting as user {}", "⚠".yellow(), user_id.bold());
        println!("  → Run 'callops admin release' to stop");
    }

    match jwt::expires_at(&session.access_token) {
        Ok(expires) => {
            let remaining = expires.signed_duration_since(chrono::Utc::now());
            if remaining.num_seconds() <= 0 {
                println!(
                    "{} Access token expired (will refresh on next command)",
                    "⚠".yellow()
                );
            } else {
                println!(
                    "{} Access token valid (expires in {}h {}m)",
                    "✓".green(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
        }
        Err(_) => println!("{} Access token expiry unknown", "○".dimmed()),
    }

    if session.refresh_cookie.is_none() {
        println!(
            "{} No refresh cookie stored (sign in again when the token expires)",
            "○".dimmed()
        );
    }
}
