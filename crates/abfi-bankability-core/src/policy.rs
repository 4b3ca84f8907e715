//! Scoring policy: the threshold ladders each category scorer applies.
//!
//! A [`RuleTable`] is an ordered list of `[lower, upper)` bands, each worth a
//! fixed number of points. Tables are data, not code, so the breakpoints can
//! be reviewed and replaced without touching the scorers. [`ScoringPolicy`]
//! groups the tables per category; its `Default` is the policy the engine
//! ships with, and any subset of categories can be overridden from JSON or
//! YAML (missing categories fall back to the defaults).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BankabilityError;
use crate::BankabilityResult;

const MAX_POINTS: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Points awarded when `lower <= value < upper`. `upper = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBand {
    pub lower: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Decimal>,
    pub points: Decimal,
}

impl RuleBand {
    pub fn new(lower: Decimal, upper: Option<Decimal>, points: Decimal) -> Self {
        RuleBand {
            lower,
            upper,
            points,
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.lower && self.upper.map_or(true, |u| value < u)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    pub bands: Vec<RuleBand>,
}

impl RuleTable {
    pub fn new(bands: Vec<RuleBand>) -> Self {
        RuleTable { bands }
    }

    /// Build a contiguous ladder from `(lower_bound, points)` steps listed in
    /// ascending order. Each step runs up to the next one; the last is
    /// unbounded.
    pub fn ladder(steps: &[(Decimal, Decimal)]) -> Self {
        let bands = steps
            .iter()
            .enumerate()
            .map(|(i, (lower, points))| {
                let upper = steps.get(i + 1).map(|(next, _)| *next);
                RuleBand::new(*lower, upper, *points)
            })
            .collect();
        RuleTable { bands }
    }

    /// Points for the first band containing `value`, or 0 if none does.
    pub fn points_for(&self, value: Decimal) -> Decimal {
        self.bands
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.points)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn max_points(&self) -> Decimal {
        self.bands
            .iter()
            .map(|b| b.points)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Check bands are well formed, ordered and non-overlapping.
    pub fn validate(&self, name: &str) -> BankabilityResult<()> {
        if self.bands.is_empty() {
            return Err(BankabilityError::InvalidPolicy(format!(
                "{name}: table has no bands"
            )));
        }
        for (i, band) in self.bands.iter().enumerate() {
            if band.points < Decimal::ZERO || band.points > MAX_POINTS {
                return Err(BankabilityError::InvalidPolicy(format!(
                    "{name}[{i}]: points must be in [0, 100]"
                )));
            }
            if let Some(upper) = band.upper {
                if upper <= band.lower {
                    return Err(BankabilityError::InvalidPolicy(format!(
                        "{name}[{i}]: upper bound must exceed lower bound"
                    )));
                }
            }
        }
        for (i, pair) in self.bands.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            match prev.upper {
                None => {
                    return Err(BankabilityError::InvalidPolicy(format!(
                        "{name}[{i}]: only the last band may be unbounded"
                    )))
                }
                Some(upper) if upper > next.lower => {
                    return Err(BankabilityError::InvalidPolicy(format!(
                        "{name}[{}]: overlaps or precedes the previous band",
                        i + 1
                    )))
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn is_non_increasing(&self) -> bool {
        self.bands.windows(2).all(|w| w[1].points <= w[0].points)
    }

    /// Every value from 0 upwards falls in exactly one band: the first band
    /// starts at or below 0, each band starts where the previous one ends and
    /// the last is unbounded.
    fn covers_from_zero(&self) -> bool {
        let starts_at_zero = self.bands.first().map_or(false, |b| b.lower <= Decimal::ZERO);
        let contiguous = self
            .bands
            .windows(2)
            .all(|w| w[0].upper == Some(w[1].lower));
        let open_ended = self.bands.last().map_or(false, |b| b.upper.is_none());
        starts_at_zero && contiguous && open_ended
    }
}

// ---------------------------------------------------------------------------
// Per-category policies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSecurityPolicy {
    /// Committed volume as % of annual requirement.
    pub coverage: RuleTable,
    /// Volume-weighted remaining term in years.
    pub remaining_term: RuleTable,
    /// Volume-weighted delivery consistency %.
    pub consistency: RuleTable,
    /// Uncommitted share of the requirement %.
    pub spot_reliance: RuleTable,
}

impl Default for VolumeSecurityPolicy {
    fn default() -> Self {
        VolumeSecurityPolicy {
            coverage: RuleTable::ladder(&[
                (dec!(0), dec!(5)),
                (dec!(60), dec!(15)),
                (dec!(80), dec!(25)),
                (dec!(100), dec!(35)),
                (dec!(120), dec!(40)),
            ]),
            remaining_term: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(3), dec!(10)),
                (dec!(5), dec!(20)),
                (dec!(7), dec!(25)),
                (dec!(10), dec!(30)),
            ]),
            consistency: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(80), dec!(10)),
                (dec!(90), dec!(15)),
                (dec!(95), dec!(20)),
            ]),
            spot_reliance: RuleTable::ladder(&[
                (dec!(0), dec!(10)),
                (dec!(10), dec!(5)),
                (dec!(25), dec!(0)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyQualityPolicy {
    /// Volume-weighted GQ rating (0-10).
    pub gq_rating: RuleTable,
    /// Volume-weighted counterparty track record in years.
    pub track_record: RuleTable,
}

impl Default for CounterpartyQualityPolicy {
    fn default() -> Self {
        CounterpartyQualityPolicy {
            gq_rating: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(2), dec!(15)),
                (dec!(4), dec!(30)),
                (dec!(6), dec!(45)),
                (dec!(8), dec!(60)),
            ]),
            track_record: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(1), dec!(10)),
                (dec!(3), dec!(20)),
                (dec!(5), dec!(30)),
                (dec!(10), dec!(40)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractStructurePolicy {
    /// Share of contracted volume under take-or-pay %.
    pub take_or_pay: RuleTable,
    /// Share of contracted volume with indexed or escalating pricing %.
    pub price_protection: RuleTable,
    /// Share of contracted volume without unilateral termination rights %.
    pub termination_free: RuleTable,
}

impl Default for ContractStructurePolicy {
    fn default() -> Self {
        ContractStructurePolicy {
            take_or_pay: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(25), dec!(15)),
                (dec!(50), dec!(30)),
                (dec!(75), dec!(40)),
            ]),
            price_protection: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(25), dec!(10)),
                (dec!(50), dec!(20)),
                (dec!(75), dec!(30)),
            ]),
            termination_free: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(50), dec!(10)),
                (dec!(75), dec!(20)),
                (dec!(100), dec!(30)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRiskPolicy {
    /// HHI on the 0-1 scale. Points must not increase with HHI.
    pub hhi: RuleTable,
}

impl Default for ConcentrationRiskPolicy {
    fn default() -> Self {
        ConcentrationRiskPolicy {
            hhi: RuleTable::ladder(&[
                (dec!(0), dec!(100)),
                (dec!(0.15), dec!(75)),
                (dec!(0.25), dec!(50)),
                (dec!(0.50), dec!(25)),
                (dec!(1), dec!(0)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalReadinessPolicy {
    /// Permits obtained as % of permits required.
    pub permits: RuleTable,
    pub infrastructure: RuleTable,
    pub on_time_delivery: RuleTable,
}

impl Default for OperationalReadinessPolicy {
    fn default() -> Self {
        OperationalReadinessPolicy {
            permits: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(50), dec!(15)),
                (dec!(75), dec!(25)),
                (dec!(100), dec!(35)),
            ]),
            infrastructure: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(25), dec!(5)),
                (dec!(50), dec!(15)),
                (dec!(75), dec!(25)),
                (dec!(100), dec!(35)),
            ]),
            on_time_delivery: RuleTable::ladder(&[
                (dec!(0), dec!(0)),
                (dec!(80), dec!(10)),
                (dec!(90), dec!(20)),
                (dec!(95), dec!(30)),
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// Full policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub volume_security: VolumeSecurityPolicy,
    pub counterparty_quality: CounterpartyQualityPolicy,
    pub contract_structure: ContractStructurePolicy,
    pub concentration_risk: ConcentrationRiskPolicy,
    pub operational_readiness: OperationalReadinessPolicy,
}

impl ScoringPolicy {
    /// Parse a (possibly partial) policy from JSON and validate it.
    pub fn from_json_str(json: &str) -> BankabilityResult<Self> {
        let policy: ScoringPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> BankabilityResult<()> {
        let vs = &self.volume_security;
        vs.coverage.validate("volume_security.coverage")?;
        vs.remaining_term.validate("volume_security.remaining_term")?;
        vs.consistency.validate("volume_security.consistency")?;
        vs.spot_reliance.validate("volume_security.spot_reliance")?;

        let cq = &self.counterparty_quality;
        cq.gq_rating.validate("counterparty_quality.gq_rating")?;
        cq.track_record.validate("counterparty_quality.track_record")?;

        let cs = &self.contract_structure;
        cs.take_or_pay.validate("contract_structure.take_or_pay")?;
        cs.price_protection.validate("contract_structure.price_protection")?;
        cs.termination_free.validate("contract_structure.termination_free")?;

        let cr = &self.concentration_risk;
        cr.hhi.validate("concentration_risk.hhi")?;
        if !cr.hhi.covers_from_zero() {
            return Err(BankabilityError::InvalidPolicy(
                "concentration_risk.hhi: bands must be contiguous from 0 with an unbounded last band"
                    .into(),
            ));
        }
        if !cr.hhi.is_non_increasing() {
            return Err(BankabilityError::InvalidPolicy(
                "concentration_risk.hhi: points must not increase with concentration".into(),
            ));
        }

        let or = &self.operational_readiness;
        or.permits.validate("operational_readiness.permits")?;
        or.infrastructure.validate("operational_readiness.infrastructure")?;
        or.on_time_delivery.validate("operational_readiness.on_time_delivery")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy_is_valid() {
        ScoringPolicy::default().validate().unwrap();
    }

    #[test]
    fn test_ladder_builds_contiguous_bands() {
        let table = RuleTable::ladder(&[(dec!(0), dec!(1)), (dec!(5), dec!(2))]);
        assert_eq!(table.bands[0], RuleBand::new(dec!(0), Some(dec!(5)), dec!(1)));
        assert_eq!(table.bands[1], RuleBand::new(dec!(5), None, dec!(2)));
    }

    #[test]
    fn test_boundary_belongs_to_upper_band() {
        let table = VolumeSecurityPolicy::default().remaining_term;
        assert_eq!(table.points_for(dec!(2.999)), dec!(0));
        assert_eq!(table.points_for(dec!(3)), dec!(10));
        assert_eq!(table.points_for(dec!(5)), dec!(20));
        assert_eq!(table.points_for(dec!(7)), dec!(25));
        assert_eq!(table.points_for(dec!(10)), dec!(30));
        assert_eq!(table.points_for(dec!(40)), dec!(30));
    }

    #[test]
    fn test_value_below_first_band_scores_zero() {
        let table = RuleTable::ladder(&[(dec!(10), dec!(50))]);
        assert_eq!(table.points_for(dec!(9)), Decimal::ZERO);
    }

    #[test]
    fn test_gap_between_bands_scores_zero() {
        let table = RuleTable::new(vec![
            RuleBand::new(dec!(0), Some(dec!(5)), dec!(10)),
            RuleBand::new(dec!(8), None, dec!(20)),
        ]);
        table.validate("gap").unwrap();
        assert_eq!(table.points_for(dec!(6)), Decimal::ZERO);
    }

    #[test]
    fn test_max_points() {
        assert_eq!(ConcentrationRiskPolicy::default().hhi.max_points(), dec!(100));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(RuleTable::new(vec![]).validate("t").is_err());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let table = RuleTable::new(vec![RuleBand::new(dec!(5), Some(dec!(5)), dec!(1))]);
        assert!(table.validate("t").is_err());
    }

    #[test]
    fn test_overlapping_bands_rejected() {
        let table = RuleTable::new(vec![
            RuleBand::new(dec!(0), Some(dec!(10)), dec!(1)),
            RuleBand::new(dec!(5), None, dec!(2)),
        ]);
        assert!(table.validate("t").is_err());
    }

    #[test]
    fn test_unbounded_band_must_be_last() {
        let table = RuleTable::new(vec![
            RuleBand::new(dec!(0), None, dec!(1)),
            RuleBand::new(dec!(5), None, dec!(2)),
        ]);
        assert!(table.validate("t").is_err());
    }

    #[test]
    fn test_points_above_hundred_rejected() {
        let table = RuleTable::ladder(&[(dec!(0), dec!(101))]);
        assert!(table.validate("t").is_err());
    }

    #[test]
    fn test_increasing_concentration_table_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.concentration_risk.hhi = RuleTable::ladder(&[(dec!(0), dec!(10)), (dec!(0.5), dec!(90))]);
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, BankabilityError::InvalidPolicy(_)));
    }

    #[test]
    fn test_gapped_concentration_table_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.concentration_risk.hhi = RuleTable::new(vec![
            RuleBand::new(dec!(0), Some(dec!(0.2)), dec!(80)),
            RuleBand::new(dec!(0.5), None, dec!(10)),
        ]);
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, BankabilityError::InvalidPolicy(_)));
    }

    #[test]
    fn test_concentration_table_starting_above_zero_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.concentration_risk.hhi = RuleTable::ladder(&[(dec!(0.1), dec!(50))]);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_bounded_last_concentration_band_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.concentration_risk.hhi = RuleTable::new(vec![
            RuleBand::new(dec!(0), Some(dec!(0.5)), dec!(80)),
            RuleBand::new(dec!(0.5), Some(dec!(1)), dec!(10)),
        ]);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_partial_policy_json_keeps_defaults() {
        let json = r#"{
            "concentration_risk": {
                "hhi": [
                    { "lower": "0", "upper": "0.5", "points": "80" },
                    { "lower": "0.5", "points": "10" }
                ]
            }
        }"#;
        let policy = ScoringPolicy::from_json_str(json).unwrap();
        assert_eq!(policy.concentration_risk.hhi.points_for(dec!(0.2)), dec!(80));
        assert_eq!(policy.volume_security, VolumeSecurityPolicy::default());
    }

    #[test]
    fn test_invalid_policy_json_rejected() {
        let json = r#"{ "concentration_risk": { "hhi": [] } }"#;
        assert!(ScoringPolicy::from_json_str(json).is_err());
    }

    #[test]
    fn test_policy_serialization_roundtrip() {
        let policy = ScoringPolicy::default();
        let json = serde_json::to_string(&policy).unwrap();
        let back = ScoringPolicy::from_json_str(&json).unwrap();
        assert_eq!(policy, back);
    }
}
