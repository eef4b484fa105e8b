//! Ledger store abstraction
//!
//! Collections are only ever read and written whole. Services take the store
//! as a parameter so tests can swap in `MemoryStore`.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::config::paths::SessionBookPaths;
use crate::error::{SessionBookError, SessionBookResult};
use crate::models::{Collection, Record};

use super::file_io::{read_json, write_json_atomic};

/// Whole-collection persistence for ledger records
pub trait LedgerStore {
    /// Load every record of a collection; empty if it was never written
    fn load<R: Record>(&self) -> SessionBookResult<Vec<R>>;

    /// Replace a collection with `records`
    fn save<R: Record>(&self, records: &[R]) -> SessionBookResult<()>;
}

/// JSON-file store: one pretty-printed array per collection in the data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    paths: SessionBookPaths,
}

impl JsonFileStore {
    /// Create a new store, making sure the data directory exists
    pub fn new(paths: SessionBookPaths) -> SessionBookResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }
}

impl LedgerStore for JsonFileStore {
    fn load<R: Record>(&self) -> SessionBookResult<Vec<R>> {
        read_json(self.paths.collection_file(R::COLLECTION.file_name()))
    }

    fn save<R: Record>(&self, records: &[R]) -> SessionBookResult<()> {
        write_json_atomic(self.paths.collection_file(R::COLLECTION.file_name()), records)
    }
}

/// In-memory store holding each collection as a JSON value
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<Collection, Value>>,
    writes: RefCell<HashMap<Collection, usize>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw JSON, e.g. records written by an older version
    pub fn with_raw(self, collection: Collection, value: Value) -> Self {
        self.collections.borrow_mut().insert(collection, value);
        self
    }

    /// Raw JSON currently held for a collection
    pub fn raw(&self, collection: Collection) -> Option<Value> {
        self.collections.borrow().get(&collection).cloned()
    }

    /// Number of times a collection has been saved
    pub fn write_count(&self, collection: Collection) -> usize {
        self.writes.borrow().get(&collection).copied().unwrap_or(0)
    }
}

impl LedgerStore for MemoryStore {
    fn load<R: Record>(&self) -> SessionBookResult<Vec<R>> {
        match self.collections.borrow().get(&R::COLLECTION) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                SessionBookError::Storage(format!("Failed to parse {}: {}", R::COLLECTION, e))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save<R: Record>(&self, records: &[R]) -> SessionBookResult<()> {
        let value = serde_json::to_value(records)?;
        self.collections.borrow_mut().insert(R::COLLECTION, value);
        *self.writes.borrow_mut().entry(R::COLLECTION).or_insert(0) += 1;
        Ok(())
    }
}
