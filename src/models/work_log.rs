//! Work log entry model.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A recorded block of billable work for a client.
///
/// The entry's monetary value is always derived from `hours_worked` and
/// `hourly_rate`; it is never stored independently. The `billed` flag is the
/// only mutable field and flips false → true exactly once, when the entry is
/// attached to an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The client the work was performed for.
    pub client_id: String,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// Hours worked, non-negative.
    pub hours_worked: Decimal,
    /// Hourly rate charged, non-negative.
    pub hourly_rate: Decimal,
    /// Whether the entry has been attached to an invoice.
    #[serde(default)]
    pub billed: bool,
}

impl WorkLogEntry {
    /// The entry's billable amount: hours × rate, rounded half-up to 2 dp.
    ///
    /// # Examples
    ///
    /// ```
    /// use finance_engine::models::WorkLogEntry;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let entry = WorkLogEntry {
    ///     id: "wl_001".to_string(),
    ///     client_id: "client_a".to_string(),
    ///     work_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     hours_worked: Decimal::from_str("5").unwrap(),
    ///     hourly_rate: Decimal::from_str("20").unwrap(),
    ///     billed: false,
    /// };
    /// assert_eq!(entry.total_amount(), Decimal::from_str("100.00").unwrap());
    /// ```
    pub fn total_amount(&self) -> Decimal {
        (self.hours_worked * self.hourly_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Validates the entry's numeric fields.
    ///
    /// Returns [`EngineError::InvalidInput`] when hours or rate are negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hours_worked < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "hours_worked".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "hourly_rate".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
