//! Audit entry data structures
//!
//! One entry per changed ledger record: what happened, to which record, and
//! the record as it looked before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Record, RecordKind};

use super::diff::generate_diff;

/// What happened to a record
///
/// Records are never deleted, so there is no removal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Appended by an appointment merge or a transaction import
    Added,
    /// Stored appointment received its attendee list
    Backfilled,
    /// Cleared flag flipped by the operator
    Toggled,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Added => write!(f, "ADDED"),
            Operation::Backfilled => write!(f, "BACKFILLED"),
            Operation::Toggled => write!(f, "TOGGLED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was made (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Which ledger the record belongs to
    pub kind: RecordKind,

    /// External identifier of the record
    pub record_id: String,

    /// Short description of the record for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The record before the change (in-place changes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// The record after the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// `field: old -> new` summary of an in-place change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    /// Entry for a record appended to its collection
    pub fn added<R: Record>(record: &R) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Added,
            kind: R::COLLECTION.kind(),
            record_id: record.id().to_string(),
            label: Some(record.label()),
            before: None,
            after: serde_json::to_value(record).ok(),
            changes: None,
        }
    }

    /// Entry for a record changed in place, with the field diff filled in
    pub fn changed<R: Record>(operation: Operation, before: &R, after: &R) -> Self {
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let changes = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation,
            kind: R::COLLECTION.kind(),
            record_id: after.id().to_string(),
            label: Some(after.label()),
            before,
            after: after_value,
            changes,
        }
    }

    /// Whether the entry concerns the given kind and/or record id
    pub fn concerns(&self, kind: Option<RecordKind>, record_id: Option<&str>) -> bool {
        kind.map_or(true, |k| k == self.kind)
            && record_id.map_or(true, |id| id == self.record_id)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.kind,
            self.record_id
        );

        if let Some(label) = &self.label {
            output.push_str(&format!(" ({})", label));
        }

        if let Some(changes) = &self.changes {
            output.push_str(&format!("\n  Changes: {}", changes));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentRecord, TransactionRecord};

    fn payment(cleared: bool) -> TransactionRecord {
        TransactionRecord {
            id: "4001".into(),
            datetime: "2025-03-03T18:00:12".into(),
            kind: "Payment".into(),
            status: "Complete".into(),
            note: "session".into(),
            from: "Pat Doe".into(),
            to: "Marla".into(),
            amount: "+ $120.00".into(),
            cleared,
        }
    }

    #[test]
    fn test_added_entry() {
        let entry = AuditEntry::added(&payment(false));

        assert_eq!(entry.operation, Operation::Added);
        assert_eq!(entry.kind, RecordKind::Transaction);
        assert_eq!(entry.record_id, "4001");
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], "+ $120.00");
        assert!(entry.changes.is_none());
    }

    #[test]
    fn test_toggled_entry_has_diff() {
        let entry = AuditEntry::changed(Operation::Toggled, &payment(false), &payment(true));

        assert_eq!(entry.changes.as_deref(), Some("cleared: false -> true"));
        assert_eq!(entry.before.as_ref().unwrap()["cleared"], false);
        assert_eq!(entry.after.as_ref().unwrap()["cleared"], true);
    }

    #[test]
    fn test_backfilled_entry_has_diff() {
        let after = AppointmentRecord {
            id: "a1".into(),
            summary: "Session".into(),
            description: String::new(),
            start: "2024-12-01".into(),
            end: "2024-12-01".into(),
            attendees: Some(vec!["Pat".into()]),
            cleared: false,
        };
        let before = AppointmentRecord {
            attendees: None,
            ..after.clone()
        };

        let entry = AuditEntry::changed(Operation::Backfilled, &before, &after);
        assert_eq!(entry.kind, RecordKind::Appointment);
        assert_eq!(entry.changes.as_deref(), Some("attendees: (added) -> [1 items]"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::added(&payment(false));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""operation":"added""#));
        assert!(json.contains(r#""kind":"transaction""#));
        assert!(!json.contains("changes"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.record_id, "4001");
    }

    #[test]
    fn test_concerns() {
        let entry = AuditEntry::added(&payment(false));

        assert!(entry.concerns(None, None));
        assert!(entry.concerns(Some(RecordKind::Transaction), Some("4001")));
        assert!(!entry.concerns(Some(RecordKind::Appointment), None));
        assert!(!entry.concerns(None, Some("4002")));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::changed(Operation::Toggled, &payment(false), &payment(true));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("TOGGLED transaction 4001"));
        assert!(formatted.contains("(2025-03-03T18:00:12 + $120.00 session)"));
        assert!(formatted.ends_with("Changes: cleared: false -> true"));
    }
}
