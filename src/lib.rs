//! SessionBook - reconcile calendar sessions against payments received
//!
//! This library keeps two independent ledgers for a solo practitioner:
//! billable sessions classified from calendar events, and completed payments
//! imported from Venmo statement exports. Repeated fetches and imports never
//! duplicate a record or overwrite what the operator has marked cleared.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Ledger records and the raw calendar event payload
//! - `storage`: Ledger store abstraction and JSON file storage
//! - `services`: Classification, merging, import and cleared toggling
//! - `audit`: Audit logging system
//! - `display`: Register formatting for the terminal
//! - `cli`: Command handlers for the `sessionbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionbook::config::paths::SessionBookPaths;
//! use sessionbook::services::{AppointmentService, JsonFileCalendarSource};
//! use sessionbook::storage::Storage;
//!
//! let storage = Storage::open(SessionBookPaths::new()?)?;
//! let source = JsonFileCalendarSource::new("events.json");
//! let report = AppointmentService::new(&storage).download(&source, "2025-03-01")?;
//! println!("Downloaded {} new appointments", report.added);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SessionBookError, SessionBookResult};
