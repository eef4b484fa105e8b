use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sessionbook::cli::{
    handle_appointment_command, handle_history_command, handle_toggle_command,
    handle_transaction_command, AppointmentCommands, TransactionCommands,
};
use sessionbook::config::{paths::SessionBookPaths, settings::Settings};
use sessionbook::models::Collection;
use sessionbook::storage::{initialize_storage, inspect_json, Storage};

#[derive(Parser)]
#[command(
    name = "sessionbook",
    version,
    about = "Reconcile therapy sessions against payments received",
    long_about = "SessionBook keeps two ledgers side by side: billable sessions \
                  pulled from your calendar and completed payments imported from \
                  Venmo statements. Mark entries cleared as you reconcile them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Appointment commands
    #[command(subcommand, alias = "appt")]
    Appointments(AppointmentCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transactions(TransactionCommands),

    /// Flip the cleared flag on an appointment or transaction
    Toggle {
        /// Record kind (appointment or transaction)
        kind: String,
        /// Record ID
        id: String,
        /// Print the JSON response instead of a sentence
        #[arg(long)]
        json: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Only show changes to this kind of record (appointment or transaction)
        #[arg(short, long)]
        kind: Option<String>,
        /// Only show changes to the record with this ID
        #[arg(long)]
        id: Option<String>,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sessionbook=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = SessionBookPaths::new()?;

    match cli.command {
        Some(Commands::Appointments(cmd)) => {
            let context = cmd.failure_context();
            let settings = Settings::load_or_create(&paths).context(context)?;
            let storage = Storage::open(paths).context(context)?;
            handle_appointment_command(&storage, &settings, cmd).context(context)?;
        }
        Some(Commands::Transactions(cmd)) => {
            let context = cmd.failure_context();
            let storage = Storage::open(paths).context(context)?;
            handle_transaction_command(&storage, cmd).context(context)?;
        }
        Some(Commands::Toggle { kind, id, json }) => {
            let storage = Storage::open(paths).context("Error toggling cleared status")?;
            handle_toggle_command(&storage, &kind, &id, json)
                .context("Error toggling cleared status")?;
        }
        Some(Commands::History { kind, id, limit }) => {
            let storage = Storage::open(paths)?;
            if let Some(audit) = storage.audit() {
                handle_history_command(audit, kind.as_deref(), id.as_deref(), limit)?;
            }
        }
        Some(Commands::Init) => {
            println!("Initializing SessionBook at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            Settings::load_or_create(&paths)?.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  sessionbook appointments fetch --start YYYY-MM-DD --events events.json");
            println!("  sessionbook transactions import statement.csv");
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("SessionBook Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Collections:");
            for collection in [Collection::Appointments, Collection::Transactions] {
                let file = paths.collection_file(collection.file_name());
                println!("  {:18} {}", collection.file_name(), inspect_json(&file));
            }
            println!();
            println!("Settings:");
            println!("  Schema version: {}", settings.schema_version);
            println!("  Session keywords: {}", settings.classifier.keywords.join(", "));
            println!("  Meeting links:    {}", settings.classifier.link_markers.join(", "));
        }
        None => {
            println!("SessionBook - reconcile sessions against payments");
            println!();
            println!("Run 'sessionbook --help' for usage information.");
        }
    }

    Ok(())
}
