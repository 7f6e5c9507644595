//! Subscription model and billing cycle cadence.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// The recurrence interval of a subscription charge.
///
/// Parsing accepts the five supported tokens case-insensitively; anything
/// else is rejected with [`EngineError::InvalidCycle`].
///
/// # Examples
///
/// ```
/// use finance_engine::models::BillingCycle;
///
/// let cycle: BillingCycle = "MONTHLY".parse().unwrap();
/// assert_eq!(cycle, BillingCycle::Monthly);
/// assert!("FORTNIGHTLY".parse::<BillingCycle>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingCycle {
    /// Charged every day.
    Daily,
    /// Charged every 7 days.
    Weekly,
    /// Charged every calendar month.
    Monthly,
    /// Charged every 3 calendar months.
    Quarterly,
    /// Charged every calendar year.
    Yearly,
}

impl BillingCycle {
    /// Returns the canonical uppercase token for this cycle.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Daily => "DAILY",
            BillingCycle::Weekly => "WEEKLY",
            BillingCycle::Monthly => "MONTHLY",
            BillingCycle::Quarterly => "QUARTERLY",
            BillingCycle::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAILY" => Ok(BillingCycle::Daily),
            "WEEKLY" => Ok(BillingCycle::Weekly),
            "MONTHLY" => Ok(BillingCycle::Monthly),
            "QUARTERLY" => Ok(BillingCycle::Quarterly),
            "YEARLY" => Ok(BillingCycle::Yearly),
            _ => Err(EngineError::InvalidCycle {
                cycle: s.to_string(),
            }),
        }
    }
}

/// A recurring charge tracked by the user.
///
/// `next_billing_date` is always `start_date` advanced by exactly one cycle
/// unit, never a partial interval. It is derived at creation time and
/// recomputed whenever the start date or cycle changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier for the subscription.
    pub id: Uuid,
    /// Display name (e.g., "Cloud storage").
    pub name: String,
    /// The amount charged each cycle.
    pub amount: Decimal,
    /// The date the subscription started or was last billed.
    pub start_date: NaiveDate,
    /// The billing cadence.
    pub cycle: BillingCycle,
    /// The projected date of the next charge.
    pub next_billing_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_all_supported_cycles() {
        for (token, expected) in [
            ("DAILY", BillingCycle::Daily),
            ("WEEKLY", BillingCycle::Weekly),
            ("MONTHLY", BillingCycle::Monthly),
            ("QUARTERLY", BillingCycle::Quarterly),
            ("YEARLY", BillingCycle::Yearly),
        ] {
            assert_eq!(BillingCycle::from_str(token).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            BillingCycle::from_str("monthly").unwrap(),
            BillingCycle::Monthly
        );
        assert_eq!(
            BillingCycle::from_str("Quarterly").unwrap(),
            BillingCycle::Quarterly
        );
    }

    #[test]
    fn test_parse_unknown_token_fails_with_invalid_cycle() {
        let err = BillingCycle::from_str("FORTNIGHTLY").unwrap_err();
        match err {
            EngineError::InvalidCycle { cycle } => assert_eq!(cycle, "FORTNIGHTLY"),
            other => panic!("Expected InvalidCycle, got {:?}", other),
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let cycle = BillingCycle::Quarterly;
        assert_eq!(
            BillingCycle::from_str(&cycle.to_string()).unwrap(),
            cycle
        );
    }

    #[test]
    fn test_cycle_serializes_as_uppercase_token() {
        let json = serde_json::to_string(&BillingCycle::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");

        let cycle: BillingCycle = serde_json::from_str("\"YEARLY\"").unwrap();
        assert_eq!(cycle, BillingCycle::Yearly);
    }

    #[test]
    fn test_subscription_serialization_round_trip() {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            name: "Cloud storage".to_string(),
            amount: Decimal::from_str("9.99").unwrap(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            cycle: BillingCycle::Monthly,
            next_billing_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        };

        let json = serde_json::to_string(&subscription).unwrap();
        let deserialized: Subscription = serde_json::from_str(&json).unwrap();
        assert_eq!(subscription, deserialized);
    }
}
