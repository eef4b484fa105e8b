//! Clear-toggle service
//!
//! Flips the `cleared` flag the operator uses to mark an appointment or a
//! payment as reconciled. Unknown kinds and ids are not errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::{AuditEntry, Operation};
use crate::error::SessionBookResult;
use crate::models::{AppointmentRecord, Record, RecordKind, TransactionRecord};
use crate::storage::{LedgerStore, Storage};

/// What a toggle request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The first matching record now has this cleared value
    Toggled { cleared: bool },
    /// No record had the id; the collection was written back unchanged
    NotFound,
    /// The kind string named no collection; nothing was read or written
    UnknownKind,
}

/// Response shape returned to the caller of a toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }

    /// Convert the result of a toggle into the boundary response
    pub fn from_result<T>(result: &SessionBookResult<T>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

/// Service for marking records cleared
pub struct ReconciliationService<'a, S: LedgerStore> {
    storage: &'a Storage<S>,
}

impl<'a, S: LedgerStore> ReconciliationService<'a, S> {
    /// Create a new reconciliation service
    pub fn new(storage: &'a Storage<S>) -> Self {
        Self { storage }
    }

    /// Toggle `cleared` on the record of kind `kind` with id `id`
    pub fn toggle(&self, kind: &str, id: &str) -> SessionBookResult<ToggleOutcome> {
        match RecordKind::parse(kind) {
            Some(RecordKind::Appointment) => self.toggle_in::<AppointmentRecord>(id),
            Some(RecordKind::Transaction) => self.toggle_in::<TransactionRecord>(id),
            None => {
                debug!(kind, "ignoring toggle for unknown record kind");
                Ok(ToggleOutcome::UnknownKind)
            }
        }
    }

    /// Toggle the first record with `id` in `R`'s collection
    pub fn toggle_in<R: Record>(&self, id: &str) -> SessionBookResult<ToggleOutcome> {
        let collection = R::COLLECTION;
        let mut records: Vec<R> = self.storage.store().load()?;

        let change = match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                let before = records[index].clone();
                records[index].toggle_cleared();
                Some((before, index))
            }
            None => None,
        };

        self.storage.store().save(&records)?;

        let Some((before, index)) = change else {
            debug!(collection = %collection, id, "no record to toggle");
            return Ok(ToggleOutcome::NotFound);
        };

        let after = &records[index];
        self.storage
            .record(&[AuditEntry::changed(Operation::Toggled, &before, after)]);

        info!(
            collection = %collection,
            id,
            cleared = after.is_cleared(),
            "toggled cleared"
        );
        Ok(ToggleOutcome::Toggled {
            cleared: after.is_cleared(),
        })
    }
}
