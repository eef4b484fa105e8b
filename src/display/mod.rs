//! Display formatting for terminal output
//!
//! Plain-text registers for both ledgers. A `✓` in the status column marks a
//! cleared record.

pub mod appointment;
pub mod transaction;

pub use appointment::{format_appointment_register, format_appointment_row};
pub use transaction::{format_transaction_register, format_transaction_row};

/// Status column for a record
pub(crate) fn status_icon(cleared: bool) -> &'static str {
    if cleared {
        "✓"
    } else {
        " "
    }
}

/// Pad or cut `s` to exactly `width` characters
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:width$}", s, width = width)
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short     ");
        let result = truncate("A very long string", 10);
        assert_eq!(result, "A very ...");
        assert_eq!(truncate("ééééééééééééé", 5).chars().count(), 5);
    }

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(true), "✓");
        assert_eq!(status_icon(false), " ");
    }
}
