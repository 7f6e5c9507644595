//! Billing date projection.
//!
//! Computes the next occurrence of a subscription charge from its start date
//! and cadence. Month- and year-based cadences preserve the day of month and
//! clamp to the last day of the target month when it is shorter, so Jan 31
//! plus one month lands on Feb 28 (or Feb 29 in a leap year).

use chrono::{Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::BillingCycle;

/// Projects the next billing date one cycle unit after `start`.
///
/// This is a pure function and must be recomputed whenever the start date or
/// cycle changes; both are user-editable before save, so the result is never
/// cached.
///
/// # Examples
///
/// ```
/// use finance_engine::calculation::next_occurrence;
/// use finance_engine::models::BillingCycle;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let next = next_occurrence(start, BillingCycle::Monthly).unwrap();
/// assert_eq!(next, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn next_occurrence(start: NaiveDate, cycle: BillingCycle) -> EngineResult<NaiveDate> {
    // checked_add_months clamps to the last valid day of the target month,
    // which is exactly the required month-end behaviour.
    let next = match cycle {
        BillingCycle::Daily => start.checked_add_days(Days::new(1)),
        BillingCycle::Weekly => start.checked_add_days(Days::new(7)),
        BillingCycle::Monthly => start.checked_add_months(Months::new(1)),
        BillingCycle::Quarterly => start.checked_add_months(Months::new(3)),
        BillingCycle::Yearly => start.checked_add_months(Months::new(12)),
    };

    next.ok_or_else(|| EngineError::CalculationError {
        message: format!("next billing date out of range for start date {}", start),
    })
}
