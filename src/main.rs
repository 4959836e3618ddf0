//! callops CLI - operator console for the AI voice-calling platform

use clap::{CommandFactory, Parser};
use env_logger::Env;

use callops::cli::{
    self, AdminCommands, AssistantCommands, CalendarCommands, Cli, Commands, DocumentCommands,
    GlobalOptions, PasswordCommands, PaymentCommands, PhoneCommands, ReportCommands,
};
use callops::error::Result;
use callops::notify::Notice;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli).await {
        Notice::from_error(&err).print();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Signup {
            name,
            email,
            password,
        } => cli::auth::signup(&opts, name, email, password).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Password(cmd) => match cmd {
            PasswordCommands::Forgot { email } => cli::auth::forgot_password(&opts, email).await,
            PasswordCommands::Reset { token, password } => {
                cli::auth::reset_password(&opts, token, password).await
            }
        },
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("callops version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Assistant(cmd) => match cmd {
            AssistantCommands::List => cli::assistant::list(&opts).await,
            AssistantCommands::Get { id } => cli::assistant::get(&opts, &id).await,
            AssistantCommands::Create { fields } => cli::assistant::create(&opts, &fields).await,
            AssistantCommands::Edit { id, fields } => {
                cli::assistant::edit(&opts, &id, &fields).await
            }
            AssistantCommands::Delete { id } => cli::assistant::delete(&opts, &id).await,
        },
        Commands::Phone(cmd) => match cmd {
            PhoneCommands::List => cli::phone::list(&opts).await,
            PhoneCommands::Buy {
                area_code,
                assistant,
            } => cli::phone::buy(&opts, area_code, assistant).await,
            PhoneCommands::Attach { id, assistant, .. } => {
                cli::phone::attach(&opts, &id, assistant).await
            }
            PhoneCommands::Forward {
                assistant, number, ..
            } => cli::phone::forward(&opts, &assistant, number).await,
            PhoneCommands::Release { id } => cli::phone::release(&opts, &id).await,
        },
        Commands::Document(cmd) => match cmd {
            DocumentCommands::List => cli::document::list(&opts).await,
            DocumentCommands::Upload { path } => cli::document::upload(&opts, &path).await,
            DocumentCommands::Delete { id } => cli::document::delete(&opts, &id).await,
        },
        Commands::Payment(cmd) => match cmd {
            PaymentCommands::List => cli::payment::list(&opts).await,
            PaymentCommands::Add { payment_method_id } => {
                cli::payment::add(&opts, payment_method_id).await
            }
            PaymentCommands::Default { id } => cli::payment::set_default(&opts, &id).await,
            PaymentCommands::Delete { id } => cli::payment::delete(&opts, &id).await,
            PaymentCommands::Pay {
                amount,
                currency,
                method,
            } => cli::payment::charge(&opts, &amount, &currency, method).await,
        },
        Commands::Calendar(cmd) => match cmd {
            CalendarCommands::EventTypes { api_key } => {
                cli::calendar::event_types(&opts, api_key).await
            }
            CalendarCommands::Connect {
                event_type,
                timezone,
                api_key,
            } => cli::calendar::connect(&opts, event_type, timezone, api_key).await,
            CalendarCommands::Show => cli::calendar::show(&opts).await,
        },
        Commands::Report(cmd) => match cmd {
            ReportCommands::Calls {
                filters,
                pagination,
            } => cli::report::calls(&opts, &filters, &pagination).await,
            ReportCommands::Usage { filters } => cli::report::usage(&opts, &filters).await,
        },
        Commands::Admin(cmd) => match cmd {
            AdminCommands::Users => cli::admin::users(&opts).await,
            AdminCommands::Impersonate { user_id } => {
                cli::admin::impersonate(&opts, &user_id).await
            }
            AdminCommands::Release => cli::admin::release(&opts).await,
        },
        Commands::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "callops", &mut std::io::stdout());
            Ok(())
        }
    }
}
