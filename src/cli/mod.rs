//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod admin;
pub mod args;
pub mod assistant;
pub mod auth;
pub mod calendar;
pub mod confirm;
pub mod context;
pub mod document;
pub mod handlers;
pub mod payment;
pub mod phone;
pub mod report;
pub mod status;

pub use args::{CallFilterArgs, GlobalOptions, OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// callops - operator console for the AI voice-calling platform
#[derive(Parser, Debug)]
#[command(name = "callops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "CALLOPS_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "CALLOPS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the backend host (e.g. http://localhost:8000)
    #[arg(long, global = true, env = "CALLOPS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CALLOPS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the platform
    Login {
        /// Account email (prompted if omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted if omitted)
        #[arg(long, env = "CALLOPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long, short = 'e')]
        email: String,

        /// Password (prompted if omitted)
        #[arg(long, env = "CALLOPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the local session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Recover a forgotten password
    #[command(subcommand)]
    Password(PasswordCommands),

    /// Show session and configuration status
    Status,

    /// Display version information
    Version,

    /// Manage call assistants
    #[command(subcommand)]
    Assistant(AssistantCommands),

    /// Manage phone numbers
    #[command(subcommand)]
    Phone(PhoneCommands),

    /// Manage knowledge-base documents
    #[command(subcommand)]
    Document(DocumentCommands),

    /// Manage payment methods and top-ups
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Connect a booking calendar
    #[command(subcommand)]
    Calendar(CalendarCommands),

    /// Call log and usage reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Admin-only user management
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   callops completion bash > /etc/bash_completion.d/callops
  zsh:    callops completion zsh > \"${fpath[1]}/_callops\"
  fish:   callops completion fish > ~/.config/fish/completions/callops.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommands {
    /// Email a password-reset link
    Forgot {
        #[arg(long, short = 'e')]
        email: String,
    },

    /// Set a new password with the emailed reset token
    Reset {
        #[arg(long)]
        token: String,

        /// New password (prompted if omitted)
        #[arg(long, env = "CALLOPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// Editable assistant fields; anything omitted is left unchanged
#[derive(Args, Debug, Clone, Default)]
pub struct AssistantFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Greeting spoken when the call connects
    #[arg(long)]
    pub first_message: Option<String>,

    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Read the system prompt from a file
    #[arg(long, conflicts_with = "system_prompt")]
    pub system_prompt_file: Option<std::path::PathBuf>,

    /// Language model provider (e.g. openai)
    #[arg(long, requires = "model")]
    pub model_provider: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Completion limit, 1 to 4096
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Voice provider (e.g. 11labs)
    #[arg(long, requires = "voice_id")]
    pub voice_provider: Option<String>,

    #[arg(long)]
    pub voice_id: Option<String>,

    /// Spoken before hanging up
    #[arg(long)]
    pub end_call_message: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AssistantCommands {
    /// List assistants
    List,

    /// Show one assistant
    Get { id: String },

    /// Create an assistant
    Create {
        #[command(flatten)]
        fields: AssistantFields,
    },

    /// Change an assistant's settings
    Edit {
        id: String,

        #[command(flatten)]
        fields: AssistantFields,
    },

    /// Delete an assistant
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PhoneCommands {
    /// List phone numbers
    List,

    /// Buy a number in an area code
    Buy {
        /// Three-digit area code
        #[arg(long)]
        area_code: String,

        /// Assistant that answers the number
        #[arg(long)]
        assistant: Option<String>,
    },

    /// Point a number at an assistant
    Attach {
        /// Phone number ID
        id: String,

        #[arg(long, required_unless_present = "detach")]
        assistant: Option<String>,

        /// Leave the number unattached
        #[arg(long, conflicts_with = "assistant")]
        detach: bool,
    },

    /// Set the number an assistant transfers calls to
    Forward {
        /// Assistant ID
        assistant: String,

        /// E.164 number, e.g. +14155550100
        #[arg(required_unless_present = "clear")]
        number: Option<String>,

        /// Stop forwarding
        #[arg(long, conflicts_with = "number")]
        clear: bool,
    },

    /// Release a number back to the carrier
    Release { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// List documents
    List,

    /// Upload a file to the knowledge base
    Upload { path: std::path::PathBuf },

    /// Delete a document
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// List saved payment methods
    List,

    /// Save a processor-tokenized payment method (pm_...)
    Add { payment_method_id: String },

    /// Make a payment method the default
    Default { id: String },

    /// Remove a payment method
    Delete { id: String },

    /// Add credit to the account
    Pay {
        /// Amount, e.g. 25 or 25.50
        amount: String,

        #[arg(long, default_value = "usd")]
        currency: String,

        /// Payment method to charge (default method if omitted)
        #[arg(long)]
        method: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// List event types available with a booking API key
    EventTypes {
        /// Booking provider API key (prompted if omitted)
        #[arg(long, env = "CALLOPS_CALENDAR_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Save the calendar integration
    Connect {
        #[arg(long)]
        event_type: String,

        /// IANA timezone, e.g. America/New_York
        #[arg(long)]
        timezone: String,

        #[arg(long, env = "CALLOPS_CALENDAR_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Show the saved integration
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Call log
    Calls {
        #[command(flatten)]
        filters: CallFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Usage totals by assistant
    Usage {
        #[command(flatten)]
        filters: CallFilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List all platform users
    Users,

    /// Act as another user
    Impersonate { user_id: String },

    /// Stop impersonating and restore the admin session
    Release,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assistant_edit_parses_fields() {
        let cli = Cli::parse_from([
            "callops",
            "assistant",
            "edit",
            "asst-1",
            "--temperature",
            "0.7",
            "--max-tokens",
            "300",
        ]);

        match cli.command {
            Commands::Assistant(AssistantCommands::Edit { id, fields }) => {
                assert_eq!(id, "asst-1");
                assert_eq!(fields.temperature, Some(0.7));
                assert_eq!(fields.max_tokens, Some(300));
                assert!(fields.name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_phone_attach_requires_target() {
        let result = Cli::try_parse_from(["callops", "phone", "attach", "pn-1"]);
        assert!(result.is_err());

        let detach = Cli::try_parse_from(["callops", "phone", "attach", "pn-1", "--detach"]);
        assert!(detach.is_ok());
    }

    #[test]
    fn test_report_all_conflicts_with_page() {
        let result =
            Cli::try_parse_from(["callops", "report", "calls", "--all", "--page", "2"]);
        assert!(result.is_err());
    }
}
