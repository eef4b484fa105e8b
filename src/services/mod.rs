//! Service layer for SessionBook
//!
//! The service layer holds the reconciliation rules on top of the storage
//! layer: classifying calendar events, merging fetched appointments, importing
//! payment exports and toggling the cleared flag. Every mutating operation
//! loads a whole collection, saves it back and then records what changed in
//! the audit log.

pub mod appointment;
pub mod attendees;
pub mod calendar;
pub mod classifier;
pub mod import;
pub mod merge;
pub mod reconciliation;

pub use appointment::{parse_start_date, AppointmentService};
pub use attendees::extract_attendees;
pub use calendar::{CalendarSource, CalendarWindow, JsonFileCalendarSource};
pub use classifier::is_billable_session;
pub use import::{find_header_line, parse_export, ImportService};
pub use merge::{append_new, backfill_attendees, merge_appointments, MergeReport, Merged};
pub use reconciliation::{ReconciliationService, ToggleOutcome, ToggleResponse};
