//! Counterparty Quality: the grade and track record of the parties behind
//! each agreement, weighted by the volume they supply.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::factor;
use crate::error::BankabilityError;
use crate::policy::CounterpartyQualityPolicy;
use crate::types::{AgreementForScoring, CategoryScore, CounterpartyProfile, ScoreCategory, Years};
use crate::weighted::{weighted_average, weighted_average_gq};
use crate::BankabilityResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyQualityInput {
    pub weighted_gq_rating: Decimal,
    pub weighted_track_record_years: Years,
}

impl CounterpartyQualityInput {
    /// Resolve every agreement to its counterparty and weight by annual
    /// volume. An agreement whose counterparty is unknown is a validation
    /// failure on `agreements[i].counterparty_id`.
    pub fn from_agreements(
        agreements: &[AgreementForScoring],
        counterparties: &[CounterpartyProfile],
    ) -> BankabilityResult<Self> {
        let by_id: HashMap<&str, &CounterpartyProfile> = counterparties
            .iter()
            .map(|c| (c.counterparty_id.as_str(), c))
            .collect();

        let mut gq = Vec::with_capacity(agreements.len());
        let mut track_record = Vec::with_capacity(agreements.len());
        for (i, agreement) in agreements.iter().enumerate() {
            let cp = by_id
                .get(agreement.counterparty_id.as_str())
                .ok_or_else(|| {
                    BankabilityError::validation(
                        format!("agreements[{i}].counterparty_id"),
                        format!("Unknown counterparty '{}'", agreement.counterparty_id),
                    )
                })?;
            gq.push((cp.gq_rating, agreement.annual_volume));
            track_record.push((cp.track_record_years, agreement.annual_volume));
        }

        Ok(CounterpartyQualityInput {
            weighted_gq_rating: weighted_average_gq(&gq),
            weighted_track_record_years: weighted_average(&track_record),
        })
    }
}

pub fn score_counterparty_quality(
    input: &CounterpartyQualityInput,
    policy: &CounterpartyQualityPolicy,
) -> CategoryScore {
    let mut factors = BTreeMap::new();
    factors.insert(
        "weighted_gq_rating".to_string(),
        factor(input.weighted_gq_rating, &policy.gq_rating),
    );
    factors.insert(
        "weighted_track_record_years".to_string(),
        factor(input.weighted_track_record_years, &policy.track_record),
    );
    CategoryScore::from_factors(ScoreCategory::CounterpartyQuality, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgreementBuilder, AgreementTier};
    use rust_decimal_macros::dec;

    fn agreement(id: &str, cp: &str, volume: Decimal) -> AgreementForScoring {
        AgreementBuilder::new(id, cp, AgreementTier::Tier1, volume)
            .term(dec!(5), dec!(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_strong_counterparties() {
        let input = CounterpartyQualityInput {
            weighted_gq_rating: dec!(8.5),
            weighted_track_record_years: dec!(12),
        };
        let score = score_counterparty_quality(&input, &CounterpartyQualityPolicy::default());
        assert_eq!(score.score, dec!(100));
    }

    #[test]
    fn test_mid_counterparties() {
        // gq 5 -> 30, track record 4 -> 20
        let input = CounterpartyQualityInput {
            weighted_gq_rating: dec!(5),
            weighted_track_record_years: dec!(4),
        };
        let score = score_counterparty_quality(&input, &CounterpartyQualityPolicy::default());
        assert_eq!(score.score, dec!(50));
    }

    #[test]
    fn test_gq_boundaries() {
        let policy = CounterpartyQualityPolicy::default();
        for (gq, expected) in [
            (dec!(0), dec!(0)),
            (dec!(1.99), dec!(0)),
            (dec!(2), dec!(15)),
            (dec!(4), dec!(30)),
            (dec!(6), dec!(45)),
            (dec!(8), dec!(60)),
            (dec!(10), dec!(60)),
        ] {
            assert_eq!(policy.gq_rating.points_for(gq), expected, "gq {gq}");
        }
    }

    #[test]
    fn test_from_agreements_weights_by_volume() {
        let counterparties = vec![
            CounterpartyProfile::new("C1", dec!(8), dec!(10)).unwrap(),
            CounterpartyProfile::new("C2", dec!(4), dec!(2)).unwrap(),
        ];
        let agreements = vec![
            agreement("A1", "C1", dec!(3_000)),
            agreement("A2", "C2", dec!(1_000)),
        ];
        let input = CounterpartyQualityInput::from_agreements(&agreements, &counterparties).unwrap();
        // (8*3000 + 4*1000) / 4000 = 7
        assert_eq!(input.weighted_gq_rating, dec!(7));
        // (10*3000 + 2*1000) / 4000 = 8
        assert_eq!(input.weighted_track_record_years, dec!(8));
    }

    #[test]
    fn test_from_agreements_unknown_counterparty() {
        let counterparties = vec![CounterpartyProfile::new("C1", dec!(8), dec!(10)).unwrap()];
        let agreements = vec![
            agreement("A1", "C1", dec!(3_000)),
            agreement("A2", "C9", dec!(1_000)),
        ];
        let err = CounterpartyQualityInput::from_agreements(&agreements, &counterparties).unwrap_err();
        assert_eq!(err.field(), Some("agreements[1].counterparty_id"));
    }

    #[test]
    fn test_no_agreements_scores_zero() {
        let input = CounterpartyQualityInput::from_agreements(&[], &[]).unwrap();
        let score = score_counterparty_quality(&input, &CounterpartyQualityPolicy::default());
        assert_eq!(score.score, Decimal::ZERO);
    }
}
