//! Configuration types for the finance engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration structure, mirroring the YAML file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tiered mileage reimbursement rates.
    pub mileage: MileageRates,
}

/// Tiered per-mile reimbursement rates for a tax year.
///
/// The first `threshold_miles` miles in a tax year are reimbursed at
/// `high_rate`; miles beyond the threshold at `low_rate`. The shipped
/// configuration carries the HMRC approved rates (10,000 miles at 0.45,
/// 0.25 thereafter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageRates {
    /// The cumulative annual mileage at which the rate drops.
    pub threshold_miles: Decimal,
    /// Per-mile rate below the threshold.
    pub high_rate: Decimal,
    /// Per-mile rate above the threshold.
    pub low_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_engine_config_from_yaml() {
        let yaml = r#"
mileage:
  threshold_miles: "10000"
  high_rate: "0.45"
  low_rate: "0.25"
"#;

        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.mileage.threshold_miles,
            Decimal::from_str("10000").unwrap()
        );
        assert_eq!(config.mileage.high_rate, Decimal::from_str("0.45").unwrap());
        assert_eq!(config.mileage.low_rate, Decimal::from_str("0.25").unwrap());
    }

    #[test]
    fn test_missing_rate_field_fails_to_deserialize() {
        let yaml = r#"
mileage:
  threshold_miles: "10000"
  high_rate: "0.45"
"#;

        assert!(serde_yaml::from_str::<EngineConfig>(yaml).is_err());
    }
}
