//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod appointment;
pub mod history;
pub mod toggle;
pub mod transaction;

pub use appointment::{handle_appointment_command, AppointmentCommands};
pub use history::handle_history_command;
pub use toggle::handle_toggle_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
