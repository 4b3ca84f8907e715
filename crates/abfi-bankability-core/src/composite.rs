//! Composite bankability score.
//!
//! `composite = 0.30 * volume_security + 0.25 * counterparty_quality
//!            + 0.20 * contract_structure + 0.15 * concentration_risk
//!            + 0.10 * operational_readiness`
//!
//! rounded half away from zero to a whole point. Weights are fixed; see
//! [`ScoreCategory::weight`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{clamp_score, require_percent, Score, ScoreCategory};
use crate::BankabilityResult;

/// The five category sub-scores, each in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySubScores {
    pub volume_security: Score,
    pub counterparty_quality: Score,
    pub contract_structure: Score,
    pub concentration_risk: Score,
    pub operational_readiness: Score,
}

impl CategorySubScores {
    pub fn get(&self, category: ScoreCategory) -> Score {
        match category {
            ScoreCategory::VolumeSecurity => self.volume_security,
            ScoreCategory::CounterpartyQuality => self.counterparty_quality,
            ScoreCategory::ContractStructure => self.contract_structure,
            ScoreCategory::ConcentrationRisk => self.concentration_risk,
            ScoreCategory::OperationalReadiness => self.operational_readiness,
        }
    }

    /// Reject sub-scores supplied from outside the scorers that fall
    /// outside [0, 100].
    pub fn validate(&self) -> BankabilityResult<()> {
        require_percent("volume_security", self.volume_security)?;
        require_percent("counterparty_quality", self.counterparty_quality)?;
        require_percent("contract_structure", self.contract_structure)?;
        require_percent("concentration_risk", self.concentration_risk)?;
        require_percent("operational_readiness", self.operational_readiness)
    }
}

/// Unrounded weighted sum of the sub-scores.
pub fn weighted_sum(scores: &CategorySubScores) -> Decimal {
    ScoreCategory::ALL
        .iter()
        .map(|c| c.weight() * scores.get(*c))
        .sum()
}

/// Weighted composite, rounded to a whole point and clamped to [0, 100].
pub fn calculate_composite(scores: &CategorySubScores) -> Score {
    let rounded =
        weighted_sum(scores).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    clamp_score(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scores(v: [Decimal; 5]) -> CategorySubScores {
        CategorySubScores {
            volume_security: v[0],
            counterparty_quality: v[1],
            contract_structure: v[2],
            concentration_risk: v[3],
            operational_readiness: v[4],
        }
    }

    #[test]
    fn test_composite_weighted() {
        // 24 + 17.5 + 12 + 7.5 + 4 = 65
        let s = scores([dec!(80), dec!(70), dec!(60), dec!(50), dec!(40)]);
        assert_eq!(weighted_sum(&s), dec!(65));
        assert_eq!(calculate_composite(&s), dec!(65));
    }

    #[test]
    fn test_composite_all_hundred() {
        let s = scores([dec!(100); 5]);
        assert_eq!(calculate_composite(&s), dec!(100));
    }

    #[test]
    fn test_composite_all_zero() {
        let s = scores([Decimal::ZERO; 5]);
        assert_eq!(calculate_composite(&s), Decimal::ZERO);
    }

    #[test]
    fn test_composite_half_point_rounds_up() {
        // 0.30 * 35 = 10.5
        let s = scores([dec!(35), dec!(0), dec!(0), dec!(0), dec!(0)]);
        assert_eq!(weighted_sum(&s), dec!(10.5));
        assert_eq!(calculate_composite(&s), dec!(11));
    }

    #[test]
    fn test_composite_rounds_down_below_half() {
        // 0.25 * 61 = 15.25
        let s = scores([dec!(0), dec!(61), dec!(0), dec!(0), dec!(0)]);
        assert_eq!(calculate_composite(&s), dec!(15));
    }

    #[test]
    fn test_validate_rejects_out_of_range_sub_score() {
        let err = scores([dec!(80), dec!(70), dec!(160), dec!(50), dec!(40)])
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("contract_structure"));
        let err = scores([dec!(80), dec!(70), dec!(60), dec!(50), dec!(-1)])
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("operational_readiness"));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(scores([dec!(0), dec!(100), dec!(0), dec!(100), dec!(50)])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_get_by_category() {
        let s = scores([dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        assert_eq!(s.get(ScoreCategory::ContractStructure), dec!(3));
        assert_eq!(s.get(ScoreCategory::OperationalReadiness), dec!(5));
    }
}
