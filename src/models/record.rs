//! Record and collection abstractions
//!
//! Every ledger record lives in exactly one named collection and is keyed by
//! a stable external identifier. The `Record` trait ties a record type to its
//! collection so storage and services can work over either kind.

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// A named, persisted collection of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Appointments,
    Transactions,
}

impl Collection {
    /// Collection name as used in messages and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Appointments => "appointments",
            Self::Transactions => "transactions",
        }
    }

    /// File name the collection is persisted under
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Appointments => "appointments.json",
            Self::Transactions => "transactions.json",
        }
    }

    /// Kind of the records held in this collection
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Appointments => RecordKind::Appointment,
            Self::Transactions => RecordKind::Transaction,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a single ledger record, as named by toggle requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Appointment,
    Transaction,
}

impl RecordKind {
    /// Parse a kind string, returning `None` for anything unrecognised
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// The collection records of this kind live in
    pub fn collection(&self) -> Collection {
        match self {
            Self::Appointment => Collection::Appointments,
            Self::Transaction => Collection::Transactions,
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointment" => Ok(Self::Appointment),
            "transaction" => Ok(Self::Transaction),
            other => Err(format!("unknown record kind: {}", other)),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Appointment => write!(f, "appointment"),
            Self::Transaction => write!(f, "transaction"),
        }
    }
}

/// A persisted ledger record
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection this record type is stored in
    const COLLECTION: Collection;

    /// Stable external identifier
    fn id(&self) -> &str;

    /// Whether the operator has marked this record as reconciled
    fn is_cleared(&self) -> bool;

    /// Flip the cleared flag
    fn toggle_cleared(&mut self);

    /// Short human-readable label for audit entries and messages
    fn label(&self) -> String;
}

/// Read a JSON `null` text field as an empty string
///
/// Older versions wrote `null` for cells missing from short CSV rows.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
