//! Tiered mileage claim calculation.
//!
//! Implements the two-tier reimbursement scheme: miles up to the annual
//! threshold are paid at the high rate, miles beyond it at the low rate. A
//! single trip may straddle the threshold, in which case it is split exactly.
//! Monetary rounding (half-up, 2 dp) is applied once at the final total, not
//! per tier, so split trips never accumulate rounding error.
//!
//! The tax year runs 6 April to 5 April, following the UK convention the
//! rates are drawn from.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::MileageRates;
use crate::error::{EngineError, EngineResult};
use crate::models::MileageLog;

/// The result of a mileage claim calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageClaimResult {
    /// Miles in the trip being claimed.
    pub miles: Decimal,
    /// The portion reimbursed at the high rate.
    pub miles_at_high_rate: Decimal,
    /// The portion reimbursed at the low rate.
    pub miles_at_low_rate: Decimal,
    /// Total claim divided by miles, rounded to 4 dp; zero for a zero-mile trip.
    pub effective_rate: Decimal,
    /// The claimable amount, rounded half-up to 2 dp.
    pub total_claim: Decimal,
}

/// Calculates the reimbursement claim for a single trip.
///
/// `year_to_date_before` is the cumulative mileage already claimed in the
/// same tax year, excluding this trip. A zero-mile trip is a no-op that
/// returns a zero claim, not an error.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when either argument is negative.
///
/// # Examples
///
/// ```
/// use finance_engine::calculation::calculate_claim;
/// use finance_engine::config::MileageRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = MileageRates {
///     threshold_miles: Decimal::from_str("10000").unwrap(),
///     high_rate: Decimal::from_str("0.45").unwrap(),
///     low_rate: Decimal::from_str("0.25").unwrap(),
/// };
///
/// let claim = calculate_claim(
///     Decimal::from_str("12000").unwrap(),
///     Decimal::ZERO,
///     &rates,
/// ).unwrap();
/// assert_eq!(claim.total_claim, Decimal::from_str("5000.00").unwrap());
/// ```
pub fn calculate_claim(
    miles: Decimal,
    year_to_date_before: Decimal,
    rates: &MileageRates,
) -> EngineResult<MileageClaimResult> {
    if miles < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "miles".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if year_to_date_before < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "year_to_date".to_string(),
            message: "must not be negative".to_string(),
        });
    }

    let headroom = (rates.threshold_miles - year_to_date_before).max(Decimal::ZERO);
    let miles_at_high_rate = miles.min(headroom);
    let miles_at_low_rate = miles - miles_at_high_rate;

    // Round once at the total; per-tier rounding would compound.
    let total_claim = (miles_at_high_rate * rates.high_rate
        + miles_at_low_rate * rates.low_rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let effective_rate = if miles.is_zero() {
        Decimal::ZERO
    } else {
        (total_claim / miles).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    };

    Ok(MileageClaimResult {
        miles,
        miles_at_high_rate,
        miles_at_low_rate,
        effective_rate,
        total_claim,
    })
}

/// Returns the inclusive bounds of the tax year containing `date`.
///
/// A tax year starts on 6 April and ends on the following 5 April; a date
/// before 6 April belongs to the tax year that started the previous calendar
/// year.
pub fn tax_year_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_year = if date >= april_6(date.year()) {
        date.year()
    } else {
        date.year() - 1
    };
    let start = april_6(start_year);
    let end = april_6(start_year + 1).pred_opt().unwrap_or(start);
    (start, end)
}

/// Returns the inclusive bounds of the tax year starting 6 April of `year`.
///
/// The year comes straight from the query string, so it is checked against
/// the representable date range rather than trusted.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `year` (or `year + 1`) cannot
/// form a valid calendar date.
pub fn tax_year_starting(year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid_year = || EngineError::InvalidInput {
        field: "year".to_string(),
        message: format!("no tax year starts in calendar year {}", year),
    };

    let next = year.checked_add(1).ok_or_else(invalid_year)?;
    let start = NaiveDate::from_ymd_opt(year, 4, 6).ok_or_else(invalid_year)?;
    let end = NaiveDate::from_ymd_opt(next, 4, 6)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid_year)?;
    Ok((start, end))
}

fn april_6(year: i32) -> NaiveDate {
    // Years reachable from a NaiveDate always contain a 6 April.
    NaiveDate::from_ymd_opt(year, 4, 6).unwrap_or(NaiveDate::MIN)
}

/// Aggregated mileage figures for one tax year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearSummary {
    /// First day of the tax year.
    pub tax_year_start: NaiveDate,
    /// Last day of the tax year.
    pub tax_year_end: NaiveDate,
    /// Total miles logged in the year.
    pub total_miles: Decimal,
    /// Sum of the claims recorded for those logs.
    pub total_claim: Decimal,
    /// The portion of total miles within the threshold.
    pub miles_at_high_rate: Decimal,
    /// The portion of total miles beyond the threshold.
    pub miles_at_low_rate: Decimal,
    /// Number of logs in the year.
    pub logs_count: usize,
}

/// Summarises mileage logs falling within one tax year.
///
/// The caller supplies the logs already filtered to the year's bounds;
/// claims are summed as recorded rather than recalculated, so historic logs
/// keep the rates they were claimed under.
pub fn summarize_tax_year(
    logs: &[MileageLog],
    bounds: (NaiveDate, NaiveDate),
    rates: &MileageRates,
) -> TaxYearSummary {
    let total_miles: Decimal = logs.iter().map(|log| log.miles).sum();
    let total_claim: Decimal = logs.iter().map(|log| log.total_claim).sum();

    let miles_at_high_rate = total_miles.min(rates.threshold_miles);
    let miles_at_low_rate = (total_miles - rates.threshold_miles).max(Decimal::ZERO);

    TaxYearSummary {
        tax_year_start: bounds.0,
        tax_year_end: bounds.1,
        total_miles,
        total_claim,
        miles_at_high_rate,
        miles_at_low_rate,
        logs_count: logs.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn uk_rates() -> MileageRates {
        MileageRates {
            threshold_miles: dec("10000"),
            high_rate: dec("0.45"),
            low_rate: dec("0.25"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// MC-001: all miles under the threshold
    #[test]
    fn test_trip_entirely_at_high_rate() {
        let claim = calculate_claim(dec("100"), dec("0"), &uk_rates()).unwrap();

        assert_eq!(claim.miles_at_high_rate, dec("100"));
        assert_eq!(claim.miles_at_low_rate, dec("0"));
        assert_eq!(claim.total_claim, dec("45.00"));
        assert_eq!(claim.effective_rate, dec("0.45"));
    }

    /// MC-002: trip straddling the threshold
    #[test]
    fn test_trip_straddling_threshold() {
        let claim = calculate_claim(dec("12000"), dec("0"), &uk_rates()).unwrap();

        assert_eq!(claim.miles_at_high_rate, dec("10000"));
        assert_eq!(claim.miles_at_low_rate, dec("2000"));
        // 10000 * 0.45 + 2000 * 0.25 = 4500 + 500
        assert_eq!(claim.total_claim, dec("5000.00"));
    }

    /// MC-003: all miles beyond the threshold
    #[test]
    fn test_trip_entirely_at_low_rate() {
        let claim = calculate_claim(dec("200"), dec("15000"), &uk_rates()).unwrap();

        assert_eq!(claim.miles_at_high_rate, dec("0"));
        assert_eq!(claim.miles_at_low_rate, dec("200"));
        assert_eq!(claim.total_claim, dec("50.00"));
        assert_eq!(claim.effective_rate, dec("0.25"));
    }

    /// MC-004: zero miles is a no-op, not an error
    #[test]
    fn test_zero_miles_gives_zero_claim() {
        let claim = calculate_claim(dec("0"), dec("5000"), &uk_rates()).unwrap();

        assert_eq!(claim.total_claim, dec("0.00"));
        assert_eq!(claim.effective_rate, dec("0"));
    }

    #[test]
    fn test_straddling_trip_with_prior_mileage() {
        // 9990 already claimed: 10 miles left at 0.45, 10 at 0.25
        let claim = calculate_claim(dec("20"), dec("9990"), &uk_rates()).unwrap();

        assert_eq!(claim.miles_at_high_rate, dec("10"));
        assert_eq!(claim.miles_at_low_rate, dec("10"));
        assert_eq!(claim.total_claim, dec("7.00"));
        assert_eq!(claim.effective_rate, dec("0.35"));
    }

    #[test]
    fn test_rounding_applied_once_at_total() {
        // 10.5 * 0.45 = 4.725 -> 4.73 half-up
        let claim = calculate_claim(dec("10.5"), dec("0"), &uk_rates()).unwrap();
        assert_eq!(claim.total_claim, dec("4.73"));
    }

    #[test]
    fn test_negative_miles_rejected() {
        let err = calculate_claim(dec("-1"), dec("0"), &uk_rates()).unwrap_err();
        match err {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "miles"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_year_to_date_rejected() {
        let err = calculate_claim(dec("10"), dec("-5"), &uk_rates()).unwrap_err();
        match err {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "year_to_date"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_tax_year_bounds_after_april_6() {
        let (start, end) = tax_year_bounds(date(2026, 6, 1));
        assert_eq!(start, date(2026, 4, 6));
        assert_eq!(end, date(2027, 4, 5));
    }

    #[test]
    fn test_tax_year_bounds_before_april_6() {
        let (start, end) = tax_year_bounds(date(2026, 4, 5));
        assert_eq!(start, date(2025, 4, 6));
        assert_eq!(end, date(2026, 4, 5));
    }

    #[test]
    fn test_tax_year_bounds_on_april_6() {
        let (start, _) = tax_year_bounds(date(2026, 4, 6));
        assert_eq!(start, date(2026, 4, 6));
    }

    #[test]
    fn test_tax_year_starting_gives_inclusive_bounds() {
        let (start, end) = tax_year_starting(2025).unwrap();
        assert_eq!(start, date(2025, 4, 6));
        assert_eq!(end, date(2026, 4, 5));
    }

    #[test]
    fn test_tax_year_starting_rejects_year_beyond_date_range() {
        let err = tax_year_starting(i32::MAX).unwrap_err();
        match err {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "year"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_tax_year_starting_rejects_year_before_date_range() {
        assert!(tax_year_starting(i32::MIN).is_err());
    }

    #[test]
    fn test_summarize_tax_year_splits_totals_by_threshold() {
        let bounds = tax_year_starting(2025).unwrap();
        let logs = vec![
            MileageLog {
                id: Uuid::new_v4(),
                date: date(2025, 6, 1),
                client_id: "client_a".to_string(),
                purpose: String::new(),
                miles: dec("9990"),
                total_claim: dec("4495.50"),
            },
            MileageLog {
                id: Uuid::new_v4(),
                date: date(2025, 7, 1),
                client_id: "client_a".to_string(),
                purpose: String::new(),
                miles: dec("20"),
                total_claim: dec("7.00"),
            },
        ];

        let summary = summarize_tax_year(&logs, bounds, &uk_rates());

        assert_eq!(summary.total_miles, dec("10010"));
        assert_eq!(summary.total_claim, dec("4502.50"));
        assert_eq!(summary.miles_at_high_rate, dec("10000"));
        assert_eq!(summary.miles_at_low_rate, dec("10"));
        assert_eq!(summary.logs_count, 2);
    }

    #[test]
    fn test_summarize_empty_year() {
        let bounds = tax_year_starting(2025).unwrap();
        let summary = summarize_tax_year(&[], bounds, &uk_rates());

        assert_eq!(summary.total_miles, dec("0"));
        assert_eq!(summary.total_claim, dec("0"));
        assert_eq!(summary.logs_count, 0);
    }

    proptest! {
        /// The tier split never loses or invents miles.
        #[test]
        fn prop_tier_split_preserves_miles(miles in 0u32..30_000, ytd in 0u32..30_000) {
            let claim =
                calculate_claim(Decimal::from(miles), Decimal::from(ytd), &uk_rates()).unwrap();

            prop_assert_eq!(
                claim.miles_at_high_rate + claim.miles_at_low_rate,
                Decimal::from(miles)
            );
            prop_assert!(claim.miles_at_high_rate >= Decimal::ZERO);
            prop_assert!(claim.miles_at_low_rate >= Decimal::ZERO);
        }

        /// The claim is bounded by the high rate applied to every mile.
        #[test]
        fn prop_claim_bounded_by_rates(miles in 0u32..30_000, ytd in 0u32..30_000) {
            let rates = uk_rates();
            let claim =
                calculate_claim(Decimal::from(miles), Decimal::from(ytd), &rates).unwrap();

            prop_assert!(claim.total_claim >= Decimal::from(miles) * rates.low_rate - dec("0.01"));
            prop_assert!(claim.total_claim <= Decimal::from(miles) * rates.high_rate + dec("0.01"));
        }
    }
}
