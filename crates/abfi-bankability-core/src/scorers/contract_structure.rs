//! Contract Structure: take-or-pay cover, price escalation protection and
//! the absence of walk-away rights, each as a share of contracted volume.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::factor;
use crate::policy::ContractStructurePolicy;
use crate::types::{AgreementForScoring, CategoryScore, Percent, ScoreCategory, Volume};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractStructureInput {
    pub take_or_pay_pct: Percent,
    pub price_protected_pct: Percent,
    pub termination_free_pct: Percent,
}

impl ContractStructureInput {
    /// Shares of total contracted volume. With no contracted volume every
    /// share is 0.
    pub fn from_agreements(agreements: &[AgreementForScoring]) -> Self {
        let total: Volume = agreements.iter().map(|a| a.annual_volume).sum();
        ContractStructureInput {
            take_or_pay_pct: volume_share(agreements, total, |a| a.take_or_pay),
            price_protected_pct: volume_share(agreements, total, |a| {
                a.pricing.has_escalation_protection()
            }),
            termination_free_pct: volume_share(agreements, total, |a| !a.unilateral_termination),
        }
    }
}

fn volume_share(
    agreements: &[AgreementForScoring],
    total: Volume,
    pred: impl Fn(&AgreementForScoring) -> bool,
) -> Percent {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    let matched: Volume = agreements
        .iter()
        .filter(|&a| pred(a))
        .map(|a| a.annual_volume)
        .sum();
    matched / total * dec!(100)
}

pub fn score_contract_structure(
    input: &ContractStructureInput,
    policy: &ContractStructurePolicy,
) -> CategoryScore {
    let mut factors = BTreeMap::new();
    factors.insert(
        "take_or_pay_pct".to_string(),
        factor(input.take_or_pay_pct, &policy.take_or_pay),
    );
    factors.insert(
        "price_protected_pct".to_string(),
        factor(input.price_protected_pct, &policy.price_protection),
    );
    factors.insert(
        "termination_free_pct".to_string(),
        factor(input.termination_free_pct, &policy.termination_free),
    );
    CategoryScore::from_factors(ScoreCategory::ContractStructure, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgreementBuilder, AgreementTier, PricingMechanism};
    use rust_decimal_macros::dec;

    fn agreement(volume: Decimal) -> AgreementBuilder {
        AgreementBuilder::new("A", "C", AgreementTier::Tier1, volume).term(dec!(5), dec!(5))
    }

    #[test]
    fn test_best_structure_scores_hundred() {
        let agreements = vec![agreement(dec!(1_000))
            .take_or_pay(true)
            .pricing(PricingMechanism::Indexed)
            .build()
            .unwrap()];
        let input = ContractStructureInput::from_agreements(&agreements);
        let score = score_contract_structure(&input, &ContractStructurePolicy::default());
        assert_eq!(score.score, dec!(100));
    }

    #[test]
    fn test_worst_structure_scores_zero() {
        let agreements = vec![agreement(dec!(1_000))
            .pricing(PricingMechanism::Spot)
            .unilateral_termination(true)
            .build()
            .unwrap()];
        let input = ContractStructureInput::from_agreements(&agreements);
        let score = score_contract_structure(&input, &ContractStructurePolicy::default());
        assert_eq!(score.score, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_book_shares() {
        let agreements = vec![
            agreement(dec!(600))
                .take_or_pay(true)
                .pricing(PricingMechanism::Escalating)
                .build()
                .unwrap(),
            agreement(dec!(400))
                .pricing(PricingMechanism::Fixed)
                .unilateral_termination(true)
                .build()
                .unwrap(),
        ];
        let input = ContractStructureInput::from_agreements(&agreements);
        assert_eq!(input.take_or_pay_pct, dec!(60));
        assert_eq!(input.price_protected_pct, dec!(60));
        assert_eq!(input.termination_free_pct, dec!(60));
        // 60% -> 30 + 20 + 10
        let score = score_contract_structure(&input, &ContractStructurePolicy::default());
        assert_eq!(score.score, dec!(60));
    }

    #[test]
    fn test_no_agreements_all_shares_zero() {
        let input = ContractStructureInput::from_agreements(&[]);
        assert_eq!(input.take_or_pay_pct, Decimal::ZERO);
        assert_eq!(input.termination_free_pct, Decimal::ZERO);
    }

    #[test]
    fn test_termination_free_requires_full_share_for_top_band() {
        let policy = ContractStructurePolicy::default();
        assert_eq!(policy.termination_free.points_for(dec!(99.9)), dec!(20));
        assert_eq!(policy.termination_free.points_for(dec!(100)), dec!(30));
    }
}
