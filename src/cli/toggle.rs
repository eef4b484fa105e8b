//! Cleared-toggle CLI command

use crate::error::SessionBookResult;
use crate::services::{ReconciliationService, ToggleOutcome, ToggleResponse};
use crate::storage::{LedgerStore, Storage};

/// Handle the toggle command
///
/// With `json` the boundary response is printed instead of a sentence, also
/// when the toggle fails; the error is still returned so the process exits
/// non-zero.
pub fn handle_toggle_command<S: LedgerStore>(
    storage: &Storage<S>,
    kind: &str,
    id: &str,
    json: bool,
) -> SessionBookResult<()> {
    let result = ReconciliationService::new(storage).toggle(kind, id);

    if json {
        let response = ToggleResponse::from_result(&result);
        println!("{}", serde_json::to_string(&response)?);
        return result.map(|_| ());
    }

    match result? {
        ToggleOutcome::Toggled { cleared: true } => {
            println!("Marked {} {} as cleared", kind, id);
        }
        ToggleOutcome::Toggled { cleared: false } => {
            println!("Marked {} {} as not cleared", kind, id);
        }
        ToggleOutcome::NotFound => {
            println!("No {} with id {}; nothing changed", kind, id);
        }
        ToggleOutcome::UnknownKind => {
            println!("Unknown record kind '{}'; nothing changed", kind);
        }
    }

    Ok(())
}
