//! Appointment CLI commands
//!
//! Implements fetching sessions from a calendar source and listing the
//! appointment register.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_appointment_register;
use crate::error::SessionBookResult;
use crate::services::{AppointmentService, JsonFileCalendarSource};
use crate::storage::{LedgerStore, Storage};

/// Appointment subcommands
#[derive(Subcommand)]
pub enum AppointmentCommands {
    /// Fetch billable sessions from the calendar and merge them in
    Fetch {
        /// First day of the fetch window (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        start: String,
        /// Saved calendar `events.list` response (JSON)
        #[arg(short, long)]
        events: PathBuf,
    },
    /// List stored appointments
    List {
        /// Only show appointments that are not cleared
        #[arg(short, long)]
        uncleared: bool,
    },
}

impl AppointmentCommands {
    /// Prefix for the message shown when the command fails
    pub fn failure_context(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "Error downloading appointments",
            Self::List { .. } => "Error listing appointments",
        }
    }
}

/// Handle an appointment command
pub fn handle_appointment_command<S: LedgerStore>(
    storage: &Storage<S>,
    settings: &Settings,
    cmd: AppointmentCommands,
) -> SessionBookResult<()> {
    let service = AppointmentService::new(storage).with_rules(settings.classifier.clone());

    match cmd {
        AppointmentCommands::Fetch { start, events } => {
            let source = JsonFileCalendarSource::new(events);
            let report = service.download(&source, &start)?;

            println!("Downloaded {} new appointments", report.added);
            if report.backfilled > 0 {
                println!("Filled in attendees for {} stored appointments", report.backfilled);
            }
        }
        AppointmentCommands::List { uncleared } => {
            let mut appointments = service.list()?;
            if uncleared {
                appointments.retain(|a| !a.cleared);
            }
            print!("{}", format_appointment_register(&appointments));
        }
    }

    Ok(())
}
