//! Transaction CLI commands
//!
//! Implements importing payment exports and listing the transaction register.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::format_transaction_register;
use crate::error::SessionBookResult;
use crate::services::ImportService;
use crate::storage::{LedgerStore, Storage};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Import completed payments from a Venmo statement CSV
    Import {
        /// Path to the CSV export
        file: PathBuf,
    },
    /// List stored transactions
    List {
        /// Only show transactions that are not cleared
        #[arg(short, long)]
        uncleared: bool,
    },
}

impl TransactionCommands {
    /// Prefix for the message shown when the command fails
    pub fn failure_context(&self) -> &'static str {
        match self {
            Self::Import { .. } => "Error importing Venmo CSV",
            Self::List { .. } => "Error listing transactions",
        }
    }
}

/// Handle a transaction command
pub fn handle_transaction_command<S: LedgerStore>(
    storage: &Storage<S>,
    cmd: TransactionCommands,
) -> SessionBookResult<()> {
    let service = ImportService::new(storage);

    match cmd {
        TransactionCommands::Import { file } => {
            let report = service.import_file(&file)?;
            println!("Imported {} new transactions", report.added);
        }
        TransactionCommands::List { uncleared } => {
            let mut transactions = service.list()?;
            if uncleared {
                transactions.retain(|t| !t.cleared);
            }
            print!("{}", format_transaction_register(&transactions));
        }
    }

    Ok(())
}
