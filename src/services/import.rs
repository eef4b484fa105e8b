//! Payment export import service
//!
//! Reads a Venmo-style statement CSV: a few preamble lines, a header row, the
//! transaction rows and usually a trailer. Only completed transactions enter
//! the ledger.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::audit::AuditEntry;
use crate::error::{SessionBookError, SessionBookResult};
use crate::models::{is_complete_status, TransactionRecord};
use crate::storage::{LedgerStore, Storage};

use super::merge::{append_new, MergeReport};

/// Tokens that must all appear on the header line
pub const HEADER_TOKENS: [&str; 4] = ["ID", "Datetime", "Type", "Status"];

const ID: &str = "ID";
const DATETIME: &str = "Datetime";
const TYPE: &str = "Type";
const STATUS: &str = "Status";
const NOTE: &str = "Note";
const FROM: &str = "From";
const TO: &str = "To";
const AMOUNT: &str = "Amount (total)";

/// Index of the first line containing every header token
///
/// Lines may end in `\n`, `\r\n` or a bare `\r`.
pub fn find_header_line(content: &str) -> Option<usize> {
    unify_line_endings(content)
        .lines()
        .position(|line| HEADER_TOKENS.iter().all(|token| line.contains(token)))
}

/// Rewrite `\r\n` and bare `\r` line endings as `\n`
fn unify_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Header name to column index; the first column with a name wins
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let mut map = HashMap::new();
        for (index, name) in headers.iter().enumerate() {
            map.entry(name.to_string()).or_insert(index);
        }
        Self(map)
    }

    /// Cell under `name`; missing columns and short rows read as empty
    fn get<'r>(&self, row: &'r StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|&index| row.get(index))
            .unwrap_or("")
    }
}

/// Parse an export into the completed, well-formed transactions it contains
pub fn parse_export(content: &str) -> SessionBookResult<Vec<TransactionRecord>> {
    let content = unify_line_endings(content.trim_start_matches('\u{feff}'));

    let header_index = find_header_line(&content).ok_or_else(|| {
        SessionBookError::InputFormat("Invalid CSV format - could not find header row".into())
    })?;
    let table = content
        .lines()
        .skip(header_index)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(table.as_bytes());
    let columns = Columns::new(reader.headers()?);

    let mut transactions = Vec::new();
    for (row_number, row) in reader.records().enumerate() {
        let row = row?;

        let id = columns.get(&row, ID);
        let datetime = columns.get(&row, DATETIME);
        if id.is_empty() || datetime.is_empty() {
            debug!(row = row_number + 1, "skipping row without ID or Datetime");
            continue;
        }

        let status = columns.get(&row, STATUS);
        if !is_complete_status(status) {
            debug!(id, status, "skipping transaction that is not complete");
            continue;
        }

        transactions.push(TransactionRecord {
            id: id.to_string(),
            datetime: datetime.to_string(),
            kind: columns.get(&row, TYPE).to_string(),
            status: status.to_string(),
            note: columns.get(&row, NOTE).to_string(),
            from: columns.get(&row, FROM).to_string(),
            to: columns.get(&row, TO).to_string(),
            amount: columns.get(&row, AMOUNT).to_string(),
            cleared: false,
        });
    }

    Ok(transactions)
}

/// Service for importing payment exports
pub struct ImportService<'a, S: LedgerStore> {
    storage: &'a Storage<S>,
}

impl<'a, S: LedgerStore> ImportService<'a, S> {
    /// Create a new import service
    pub fn new(storage: &'a Storage<S>) -> Self {
        Self { storage }
    }

    /// All stored transactions, in collection order
    pub fn list(&self) -> SessionBookResult<Vec<TransactionRecord>> {
        self.storage.store().load()
    }

    /// Import an export file from disk
    pub fn import_file(&self, path: &Path) -> SessionBookResult<MergeReport> {
        let bytes = std::fs::read(path).map_err(|e| {
            SessionBookError::Io(format!("could not read {}: {}", path.display(), e))
        })?;
        self.import_bytes(&bytes)
    }

    /// Import raw export bytes, which must be UTF-8
    pub fn import_bytes(&self, bytes: &[u8]) -> SessionBookResult<MergeReport> {
        let content = std::str::from_utf8(bytes).map_err(|e| {
            SessionBookError::InputFormat(format!("export is not valid UTF-8: {}", e))
        })?;
        self.import_str(content)
    }

    /// Import export text, appending the transactions not stored yet
    pub fn import_str(&self, content: &str) -> SessionBookResult<MergeReport> {
        let parsed = parse_export(content)?;
        let parsed_count = parsed.len();

        let existing: Vec<TransactionRecord> = self.storage.store().load()?;
        let merged = append_new(existing, parsed);
        self.storage.store().save(&merged.records)?;

        let entries: Vec<AuditEntry> =
            merged.added_records().iter().map(AuditEntry::added).collect();
        self.storage.record(&entries);

        info!(
            completed = parsed_count,
            added = merged.added,
            "imported transactions"
        );
        Ok(merged.report())
    }
}
