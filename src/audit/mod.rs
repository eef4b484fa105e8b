//! Audit logging for SessionBook
//!
//! Every ledger change (a record appended by a merge or import, an attendee
//! backfill, a cleared toggle) is appended to `audit.log` after the
//! collection has been saved.
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionbook::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&[AuditEntry::changed(Operation::Toggled, &before, &after)])?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
