//! Unbilled work-log aggregation.
//!
//! Supplies the candidate set for invoice creation: a client's unbilled
//! entries ordered by work date ascending, with per-entry and total amounts
//! derived on read. Listing never mutates an entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::WorkLogEntry;

/// One unbilled entry with its derived amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbilledEntry {
    /// The work log entry id.
    pub id: String,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// Hours worked.
    pub hours_worked: Decimal,
    /// Hourly rate charged.
    pub hourly_rate: Decimal,
    /// Derived amount: hours × rate, rounded to 2 dp.
    pub total_amount: Decimal,
}

/// A client's unbilled work, ready for display in an invoice-creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbilledWork {
    /// The client the entries belong to.
    pub client_id: String,
    /// Unbilled entries, ordered by work date ascending.
    pub entries: Vec<UnbilledEntry>,
    /// Sum of the entries' derived amounts.
    pub total_amount: Decimal,
}

/// Collects a client's unbilled entries from `entries`.
///
/// Entries already billed or belonging to other clients are excluded. The
/// result is ordered by work date ascending (entry id breaks ties so the
/// order is stable across calls).
pub fn aggregate_unbilled(client_id: &str, entries: &[WorkLogEntry]) -> UnbilledWork {
    let mut candidates: Vec<&WorkLogEntry> = entries
        .iter()
        .filter(|entry| entry.client_id == client_id && !entry.billed)
        .collect();
    candidates.sort_by(|a, b| a.work_date.cmp(&b.work_date).then_with(|| a.id.cmp(&b.id)));

    let entries: Vec<UnbilledEntry> = candidates
        .into_iter()
        .map(|entry| UnbilledEntry {
            id: entry.id.clone(),
            work_date: entry.work_date,
            hours_worked: entry.hours_worked,
            hourly_rate: entry.hourly_rate,
            total_amount: entry.total_amount(),
        })
        .collect();

    let total_amount = entries.iter().map(|entry| entry.total_amount).sum();

    UnbilledWork {
        client_id: client_id.to_string(),
        entries,
        total_amount,
    }
}
