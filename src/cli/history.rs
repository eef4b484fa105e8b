//! Audit history CLI command

use crate::audit::AuditLogger;
use crate::error::{SessionBookError, SessionBookResult};
use crate::models::RecordKind;

/// Print the most recent audit entries, oldest first
///
/// `kind` and `id` narrow the history to one ledger or one record.
pub fn handle_history_command(
    audit: &AuditLogger,
    kind: Option<&str>,
    id: Option<&str>,
    limit: usize,
) -> SessionBookResult<()> {
    let kind = kind
        .map(|k| {
            RecordKind::parse(k).ok_or_else(|| {
                SessionBookError::Validation(format!(
                    "Unknown record kind '{}' (expected appointment or transaction)",
                    k
                ))
            })
        })
        .transpose()?;

    if !audit.exists() {
        println!("No history recorded yet.");
        return Ok(());
    }

    let entries = audit.read_matching(kind, id, limit)?;
    if entries.is_empty() {
        println!("No matching history.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
