//! Concentration Risk: scored inversely from the supplier HHI. A diversified
//! supply base scores high; a single supplier (HHI = 1) scores the floor.
//! Without supply positions the HHI is 0 and the category scores the
//! ceiling, since there is no measured concentration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::factor;
use crate::concentration::ConcentrationData;
use crate::policy::ConcentrationRiskPolicy;
use crate::types::{CategoryScore, ScoreCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRiskInput {
    /// Herfindahl-Hirschman Index on the 0-1 scale.
    pub hhi: Decimal,
}

impl From<&ConcentrationData> for ConcentrationRiskInput {
    fn from(data: &ConcentrationData) -> Self {
        ConcentrationRiskInput { hhi: data.hhi }
    }
}

pub fn score_concentration_risk(
    input: &ConcentrationRiskInput,
    policy: &ConcentrationRiskPolicy,
) -> CategoryScore {
    let mut factors = BTreeMap::new();
    factors.insert("hhi".to_string(), factor(input.hhi, &policy.hhi));
    CategoryScore::from_factors(ScoreCategory::ConcentrationRisk, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concentration::calculate_concentration;
    use crate::types::{SupplyPosition, VolumeUnit};
    use rust_decimal_macros::dec;

    fn score(hhi: Decimal) -> Decimal {
        score_concentration_risk(
            &ConcentrationRiskInput { hhi },
            &ConcentrationRiskPolicy::default(),
        )
        .score
    }

    #[test]
    fn test_no_data_scores_ceiling() {
        assert_eq!(score(Decimal::ZERO), dec!(100));
    }

    #[test]
    fn test_single_supplier_scores_floor() {
        let positions =
            vec![SupplyPosition::new("S1", dec!(50_000), VolumeUnit::Tonnes, None).unwrap()];
        let data = calculate_concentration(&positions);
        let result = score_concentration_risk(
            &ConcentrationRiskInput::from(&data),
            &ConcentrationRiskPolicy::default(),
        );
        assert_eq!(result.score, Decimal::ZERO);
        assert_eq!(result.factors["hhi"].observed, Decimal::ONE);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(score(dec!(0.1499)), dec!(100));
        assert_eq!(score(dec!(0.15)), dec!(75));
        assert_eq!(score(dec!(0.25)), dec!(50));
        assert_eq!(score(dec!(0.50)), dec!(25));
        assert_eq!(score(dec!(0.9999)), dec!(25));
        assert_eq!(score(Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_monotone_non_increasing() {
        let mut previous = score(Decimal::ZERO);
        let mut hhi = Decimal::ZERO;
        while hhi <= Decimal::ONE {
            let current = score(hhi);
            assert!(current <= previous, "score rose at hhi {hhi}");
            previous = current;
            hhi += dec!(0.01);
        }
    }
}
