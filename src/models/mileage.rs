//! Mileage log model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded business journey for reimbursement purposes.
///
/// `total_claim` is calculated at recording time from the tiered mileage
/// rates and the miles already logged in the journey's tax year, then stored
/// so that later rate changes do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageLog {
    /// Unique identifier for the log.
    pub id: Uuid,
    /// The date of the journey.
    pub date: NaiveDate,
    /// The client the journey was made for.
    pub client_id: String,
    /// Business purpose of the journey.
    #[serde(default)]
    pub purpose: String,
    /// Miles driven, non-negative.
    pub miles: Decimal,
    /// The claimable amount calculated at recording time.
    pub total_claim: Decimal,
}
