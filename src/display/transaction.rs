//! Transaction register formatting
//!
//! Amounts are shown exactly as the export wrote them.

use crate::models::TransactionRecord;

use super::{status_icon, truncate};

/// Counterparty shown in the register: who paid, or who was paid
fn counterparty(txn: &TransactionRecord) -> &str {
    if !txn.from.is_empty() {
        &txn.from
    } else if !txn.to.is_empty() {
        &txn.to
    } else {
        "(unknown)"
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &TransactionRecord) -> String {
    format!(
        "{:2} {} {} {:>14} {}",
        status_icon(txn.cleared),
        truncate(&txn.datetime, 19),
        truncate(counterparty(txn), 20),
        txn.amount,
        txn.note
    )
    .trim_end()
    .to_string()
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[TransactionRecord]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:19} {:20} {:>14} {}\n",
        "St", "Datetime", "From", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    let cleared = transactions.iter().filter(|t| t.cleared).count();
    output.push_str(&format!(
        "\n{} transactions, {} cleared\n",
        transactions.len(),
        cleared
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(from: &str, to: &str) -> TransactionRecord {
        TransactionRecord {
            id: "4001".into(),
            datetime: "2025-03-03T18:00:12".into(),
            kind: "Payment".into(),
            status: "Complete".into(),
            note: "session 3/3".into(),
            from: from.into(),
            to: to.into(),
            amount: "+ $120.00".into(),
            cleared: false,
        }
    }

    #[test]
    fn test_format_row() {
        let row = format_transaction_row(&transaction("Pat Doe", "Marla Hughes"));
        assert!(row.contains("2025-03-03T18:00:12"));
        assert!(row.contains("Pat Doe"));
        assert!(row.contains("+ $120.00"));
        assert!(row.ends_with("session 3/3"));
    }

    #[test]
    fn test_counterparty_fallback() {
        assert_eq!(counterparty(&transaction("", "Bank")), "Bank");
        assert_eq!(counterparty(&transaction("", "")), "(unknown)");
    }

    #[test]
    fn test_empty_register() {
        assert!(format_transaction_register(&[]).contains("No transactions found"));
    }
}
