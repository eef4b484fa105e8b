//! Transaction model
//!
//! A completed payment imported from a processor export. Text fields are kept
//! exactly as exported; `amount` in particular is never parsed.

use serde::{Deserialize, Serialize};

use super::record::{null_as_empty, Collection, Record};

/// Status value (compared case-insensitively) that admits a row into the ledger
pub const COMPLETE_STATUS: &str = "complete";

/// A ledger entry for one payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Processor transaction identifier
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub datetime: String,

    /// Processor transaction type (e.g. "Payment", "Charge")
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,

    /// Status as exported, original casing preserved
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,

    /// Raw amount text, e.g. "+ $120.00"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amount: String,

    #[serde(default)]
    pub cleared: bool,
}

impl TransactionRecord {
    /// Whether the status marks a completed payment
    pub fn is_complete(&self) -> bool {
        is_complete_status(&self.status)
    }
}

/// Case-insensitive check for the completed status
pub fn is_complete_status(status: &str) -> bool {
    status.to_lowercase() == COMPLETE_STATUS
}

impl Record for TransactionRecord {
    const COLLECTION: Collection = Collection::Transactions;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_cleared(&self) -> bool {
        self.cleared
    }

    fn toggle_cleared(&mut self) {
        self.cleared = !self.cleared;
    }

    fn label(&self) -> String {
        format!("{} {} {}", self.datetime, self.amount, self.note)
    }
}
