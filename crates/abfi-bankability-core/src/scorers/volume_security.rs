//! Volume Security: how much of the annual feedstock requirement is locked
//! in, for how long, and how reliably it has been delivered.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::factor;
use crate::policy::VolumeSecurityPolicy;
use crate::types::{
    AgreementForScoring, CategoryScore, Percent, ProjectProfile, ScoreCategory, Volume, Years,
};
use crate::weighted::{weighted_average, weighted_average_term};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSecurityInput {
    pub annual_requirement: Volume,
    /// Annual volume under Tier 1 and Tier 2 agreements.
    pub committed_volume: Volume,
    pub weighted_remaining_term_years: Years,
    pub weighted_consistency_pct: Percent,
}

impl VolumeSecurityInput {
    /// Derive from the committed (Tier 1 / Tier 2) agreements only; options
    /// and rights of first refusal do not secure volume.
    pub fn from_agreements(project: &ProjectProfile, agreements: &[AgreementForScoring]) -> Self {
        let committed: Vec<&AgreementForScoring> =
            agreements.iter().filter(|a| a.tier.is_committed()).collect();

        let committed_volume: Volume = committed.iter().map(|a| a.annual_volume).sum();
        let consistency: Vec<(Decimal, Decimal)> = committed
            .iter()
            .map(|a| (a.volume_consistency_pct, a.annual_volume))
            .collect();

        VolumeSecurityInput {
            annual_requirement: project.annual_feedstock_requirement,
            committed_volume,
            weighted_remaining_term_years: weighted_average_term(committed.iter().copied()),
            weighted_consistency_pct: weighted_average(&consistency),
        }
    }

    /// Committed volume as a percentage of the requirement. A vanishingly
    /// small requirement saturates at `Decimal::MAX` instead of overflowing.
    pub fn coverage_pct(&self) -> Percent {
        if self.annual_requirement <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.committed_volume
            .checked_div(self.annual_requirement)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .unwrap_or(Decimal::MAX)
    }

    /// Share of the requirement left to the spot market.
    pub fn spot_reliance_pct(&self) -> Percent {
        (dec!(100) - self.coverage_pct()).max(Decimal::ZERO)
    }
}

pub fn score_volume_security(
    input: &VolumeSecurityInput,
    policy: &VolumeSecurityPolicy,
) -> CategoryScore {
    let mut factors = BTreeMap::new();
    factors.insert(
        "contracted_coverage_pct".to_string(),
        factor(input.coverage_pct(), &policy.coverage),
    );
    factors.insert(
        "weighted_remaining_term_years".to_string(),
        factor(input.weighted_remaining_term_years, &policy.remaining_term),
    );
    factors.insert(
        "volume_consistency_pct".to_string(),
        factor(input.weighted_consistency_pct, &policy.consistency),
    );
    factors.insert(
        "spot_reliance_pct".to_string(),
        factor(input.spot_reliance_pct(), &policy.spot_reliance),
    );
    CategoryScore::from_factors(ScoreCategory::VolumeSecurity, factors)
}
