//! Invoice model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An invoice assembled from a client's unbilled work log entries.
///
/// The invoice holds references to the entries it covers; the entries
/// themselves exist independently and are never deleted while referenced.
/// `total_amount` is fixed at creation time as the sum of the referenced
/// entries' derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice.
    pub id: Uuid,
    /// Sequential human-readable number, e.g. "INV-007".
    pub invoice_number: String,
    /// The client this invoice is addressed to.
    pub client_id: String,
    /// The date the invoice was issued.
    pub issue_date: NaiveDate,
    /// Ids of the work log entries covered by this invoice.
    pub entry_ids: Vec<String>,
    /// Sum of the referenced entries' totals at creation time.
    pub total_amount: Decimal,
    /// When the invoice was created.
    pub created_at: DateTime<Utc>,
}
