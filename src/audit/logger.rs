//! Append-only audit log
//!
//! Entries are stored one JSON object per line. The file is only ever
//! appended to; reading it back gives the ledger's change history.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{SessionBookError, SessionBookResult};
use crate::models::RecordKind;

use super::entry::AuditEntry;

/// Writes and reads the JSONL audit log
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Append entries in order, flushing once
    pub fn append(&self, entries: &[AuditEntry]) -> SessionBookResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut lines = String::new();
        for entry in entries {
            lines.push_str(&serde_json::to_string(entry)?);
            lines.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SessionBookError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(lines.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| SessionBookError::Io(format!("Failed to write audit log: {}", e)))
    }

    /// Every entry, oldest first; a missing log reads as empty
    pub fn read_all(&self) -> SessionBookResult<Vec<AuditEntry>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SessionBookError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SessionBookError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                SessionBookError::Json(format!("Bad audit entry at line {}: {}", index + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> SessionBookResult<Vec<AuditEntry>> {
        self.read_matching(None, None, count)
    }

    /// The last `count` entries concerning the given kind and/or record id
    pub fn read_matching(
        &self,
        kind: Option<RecordKind>,
        record_id: Option<&str>,
        count: usize,
    ) -> SessionBookResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        entries.retain(|entry| entry.concerns(kind, record_id));

        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{AppointmentRecord, TransactionRecord};
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn payment(id: &str) -> AuditEntry {
        AuditEntry::added(&TransactionRecord {
            id: id.into(),
            datetime: "2025-03-03T18:00:12".into(),
            kind: "Payment".into(),
            status: "Complete".into(),
            note: String::new(),
            from: "Pat Doe".into(),
            to: "Marla".into(),
            amount: "+ $120.00".into(),
            cleared: false,
        })
    }

    fn session(id: &str) -> AuditEntry {
        AuditEntry::added(&AppointmentRecord {
            id: id.into(),
            summary: "Session".into(),
            description: String::new(),
            start: "2025-03-04".into(),
            end: "2025-03-04".into(),
            attendees: Some(Vec::new()),
            cleared: false,
        })
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = logger();

        assert!(!logger.exists());
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_append_keeps_order_across_calls() {
        let (logger, temp) = logger();

        logger.append(&[payment("t1"), session("a1")]).unwrap();
        logger.append(&[]).unwrap();
        logger.append(&[payment("t2")]).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let ids: Vec<String> = reopened
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.record_id)
            .collect();
        assert_eq!(ids, vec!["t1", "a1", "t2"]);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = logger();
        let entries: Vec<AuditEntry> = (0..10).map(|i| payment(&format!("t{}", i))).collect();
        logger.append(&entries).unwrap();

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.record_id.as_str()).collect();
        assert_eq!(ids, vec!["t7", "t8", "t9"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_read_matching() {
        let (logger, _temp) = logger();
        logger
            .append(&[payment("t1"), session("a1"), payment("t2"), payment("t1")])
            .unwrap();

        let appointments = logger
            .read_matching(Some(RecordKind::Appointment), None, 10)
            .unwrap();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].operation, Operation::Added);

        let t1 = logger.read_matching(None, Some("t1"), 10).unwrap();
        assert_eq!(t1.len(), 2);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let (logger, _temp) = logger();
        logger.append(&[payment("t1")]).unwrap();
        OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{not json}\n")
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
