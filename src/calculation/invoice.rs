//! Invoice selection validation and numbering.
//!
//! The storage layer runs [`validate_selection`] inside its invoice-creation
//! transaction: validation happens before any entry is mutated, so a failed
//! selection leaves every entry untouched.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkLogEntry;

/// Validates a set of entries selected for invoicing and returns the
/// invoice total.
///
/// # Errors
///
/// - [`EngineError::EmptySelection`] when no entries were selected.
/// - [`EngineError::CrossClientSelection`] when an entry belongs to a
///   different client.
/// - [`EngineError::AlreadyBilled`] when an entry is already on an invoice.
///   This is the guard against double invoicing from concurrent submissions.
pub fn validate_selection(client_id: &str, selected: &[WorkLogEntry]) -> EngineResult<Decimal> {
    if selected.is_empty() {
        return Err(EngineError::EmptySelection);
    }

    let mut total = Decimal::ZERO;
    for entry in selected {
        if entry.client_id != client_id {
            return Err(EngineError::CrossClientSelection {
                entry_id: entry.id.clone(),
                client_id: client_id.to_string(),
            });
        }
        if entry.billed {
            return Err(EngineError::AlreadyBilled {
                entry_id: entry.id.clone(),
            });
        }
        total += entry.total_amount();
    }

    Ok(total)
}

/// Picks the next sequential invoice number from the existing ones.
///
/// Numbers are formatted `INV-NNN`, zero-padded to three digits. Numbers
/// that do not match the pattern are ignored.
pub fn next_invoice_number<'a>(existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|number| number.strip_prefix("INV-"))
        .filter_map(|digits| digits.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!("INV-{:03}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(id: &str, client: &str, hours: &str, rate: &str, billed: bool) -> WorkLogEntry {
        WorkLogEntry {
            id: id.to_string(),
            client_id: client.to_string(),
            work_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            hours_worked: dec(hours),
            hourly_rate: dec(rate),
            billed,
        }
    }

    #[test]
    fn test_valid_selection_returns_sum_of_totals() {
        let selected = vec![
            entry("wl_001", "client_a", "5", "20", false),
            entry("wl_002", "client_a", "3", "50", false),
        ];

        let total = validate_selection("client_a", &selected).unwrap();
        assert_eq!(total, dec("250.00"));
    }

    #[test]
    fn test_empty_selection_rejected() {
        let err = validate_selection("client_a", &[]).unwrap_err();
        assert!(matches!(err, EngineError::EmptySelection));
    }

    #[test]
    fn test_cross_client_entry_rejected() {
        let selected = vec![
            entry("wl_001", "client_a", "5", "20", false),
            entry("wl_002", "client_b", "3", "50", false),
        ];

        let err = validate_selection("client_a", &selected).unwrap_err();
        match err {
            EngineError::CrossClientSelection { entry_id, client_id } => {
                assert_eq!(entry_id, "wl_002");
                assert_eq!(client_id, "client_a");
            }
            other => panic!("Expected CrossClientSelection, got {:?}", other),
        }
    }

    #[test]
    fn test_already_billed_entry_rejected() {
        let selected = vec![
            entry("wl_001", "client_a", "5", "20", false),
            entry("wl_002", "client_a", "3", "50", true),
        ];

        let err = validate_selection("client_a", &selected).unwrap_err();
        match err {
            EngineError::AlreadyBilled { entry_id } => assert_eq!(entry_id, "wl_002"),
            other => panic!("Expected AlreadyBilled, got {:?}", other),
        }
    }

    #[test]
    fn test_first_invoice_number_is_001() {
        assert_eq!(next_invoice_number(std::iter::empty()), "INV-001");
    }

    #[test]
    fn test_next_number_follows_highest_existing() {
        let existing = ["INV-001", "INV-007", "INV-003"];
        assert_eq!(next_invoice_number(existing.into_iter()), "INV-008");
    }

    #[test]
    fn test_malformed_numbers_ignored() {
        let existing = ["DRAFT-9", "INV-xyz", "INV-002"];
        assert_eq!(next_invoice_number(existing.into_iter()), "INV-003");
    }

    #[test]
    fn test_number_grows_past_three_digits() {
        let existing = ["INV-999"];
        assert_eq!(next_invoice_number(existing.into_iter()), "INV-1000");
    }
}
