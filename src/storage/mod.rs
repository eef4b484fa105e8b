//! Storage layer for SessionBook
//!
//! Provides the ledger store abstraction, its JSON-file and in-memory
//! implementations, and the `Storage` coordinator services operate on.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{inspect_json, read_json, write_json_atomic, FileState};
pub use init::initialize_storage;
pub use ledger::{JsonFileStore, LedgerStore, MemoryStore};

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::SessionBookPaths;
use crate::error::SessionBookResult;

/// Storage coordinator: a ledger store plus the audit log mutations are recorded in
pub struct Storage<S: LedgerStore = JsonFileStore> {
    store: S,
    audit: Option<AuditLogger>,
}

impl Storage<JsonFileStore> {
    /// Open the JSON-file ledger and audit log under `paths`
    pub fn open(paths: SessionBookPaths) -> SessionBookResult<Self> {
        let audit = AuditLogger::new(paths.audit_log());
        let store = JsonFileStore::new(paths)?;
        Ok(Self {
            store,
            audit: Some(audit),
        })
    }
}

impl<S: LedgerStore> Storage<S> {
    /// Wrap a store without an audit log
    pub fn new(store: S) -> Self {
        Self { store, audit: None }
    }

    /// Record mutations to `audit`
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// The underlying ledger store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The audit log, if one is attached
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append entries to the audit log
    ///
    /// Runs after the collection has been saved, so a failure here is logged
    /// and does not fail the operation.
    pub fn record(&self, entries: &[AuditEntry]) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.append(entries) {
                warn!(error = %e, "failed to write audit entries");
            }
        }
    }
}
