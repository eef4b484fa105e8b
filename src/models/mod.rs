//! Core data models for SessionBook
//!
//! This module contains the ledger records (appointments and transactions),
//! the collection abstraction they are stored under, and the raw calendar
//! event payload appointments are built from.

pub mod appointment;
pub mod event;
pub mod record;
pub mod transaction;

pub use appointment::AppointmentRecord;
pub use event::{EventAttendee, EventDateTime, EventOrganizer, RawCalendarEvent};
pub use record::{Collection, Record, RecordKind};
pub use transaction::{is_complete_status, TransactionRecord, COMPLETE_STATUS};
