//! Operational Readiness: permits in hand, infrastructure built and the
//! facility's on-time delivery history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::factor;
use crate::policy::OperationalReadinessPolicy;
use crate::types::{CategoryScore, OperationalData, Percent, ScoreCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalReadinessInput {
    pub permit_completion_pct: Percent,
    pub infrastructure_completion_pct: Percent,
    pub on_time_delivery_pct: Percent,
}

impl From<&OperationalData> for OperationalReadinessInput {
    fn from(data: &OperationalData) -> Self {
        OperationalReadinessInput {
            permit_completion_pct: data.permit_completion_pct(),
            infrastructure_completion_pct: data.infrastructure_completion_pct,
            on_time_delivery_pct: data.on_time_delivery_pct,
        }
    }
}

pub fn score_operational_readiness(
    input: &OperationalReadinessInput,
    policy: &OperationalReadinessPolicy,
) -> CategoryScore {
    let mut factors = BTreeMap::new();
    factors.insert(
        "permit_completion_pct".to_string(),
        factor(input.permit_completion_pct, &policy.permits),
    );
    factors.insert(
        "infrastructure_completion_pct".to_string(),
        factor(input.infrastructure_completion_pct, &policy.infrastructure),
    );
    factors.insert(
        "on_time_delivery_pct".to_string(),
        factor(input.on_time_delivery_pct, &policy.on_time_delivery),
    );
    CategoryScore::from_factors(ScoreCategory::OperationalReadiness, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_operating_facility_scores_hundred() {
        let data = OperationalData::new(6, 6, dec!(100), dec!(97)).unwrap();
        let score = score_operational_readiness(
            &OperationalReadinessInput::from(&data),
            &OperationalReadinessPolicy::default(),
        );
        assert_eq!(score.score, dec!(100));
    }

    #[test]
    fn test_greenfield_project() {
        // permits 1/4 = 25% -> 0, infrastructure 30 -> 5, on-time 0 -> 0
        let data = OperationalData::new(1, 4, dec!(30), Decimal::ZERO).unwrap();
        let score = score_operational_readiness(
            &OperationalReadinessInput::from(&data),
            &OperationalReadinessPolicy::default(),
        );
        assert_eq!(score.score, dec!(5));
        assert_eq!(score.factors["permit_completion_pct"].observed, dec!(25));
    }

    #[test]
    fn test_construction_stage() {
        // permits 3/4 = 75% -> 25, infrastructure 60 -> 15, on-time 92 -> 20
        let data = OperationalData::new(3, 4, dec!(60), dec!(92)).unwrap();
        let score = score_operational_readiness(
            &OperationalReadinessInput::from(&data),
            &OperationalReadinessPolicy::default(),
        );
        assert_eq!(score.score, dec!(60));
    }

    #[test]
    fn test_no_permits_required_counts_as_complete() {
        let data = OperationalData::new(0, 0, Decimal::ZERO, Decimal::ZERO).unwrap();
        let input = OperationalReadinessInput::from(&data);
        assert_eq!(input.permit_completion_pct, dec!(100));
    }
}
