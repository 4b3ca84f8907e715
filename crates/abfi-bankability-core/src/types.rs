use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{BankabilityError, BankabilityResult};

/// Feedstock quantities (tonnes, kilolitres, ...). Never negative.
pub type Volume = Decimal;

/// Percentages on a 0-100 scale.
pub type Percent = Decimal;

/// Durations in (fractional) years.
pub type Years = Decimal;

/// Scores on a 0-100 scale.
pub type Score = Decimal;

const HUNDRED: Decimal = dec!(100);
const MAX_GRADE: Decimal = dec!(10);

/// Largest accepted quantity for any single volume field. Keeps volume
/// sums and volume-weighted products well inside `Decimal`'s range.
pub const MAX_VOLUME: Volume = dec!(1_000_000_000_000_000);

/// Largest accepted duration for contract terms and track records.
pub const MAX_YEARS: Years = dec!(200);

// ---------------------------------------------------------------------------
// Field validation helpers
// ---------------------------------------------------------------------------

pub(crate) fn require_non_empty(field: &str, value: &str) -> BankabilityResult<()> {
    if value.trim().is_empty() {
        return Err(BankabilityError::validation(field, "Must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_range(
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> BankabilityResult<()> {
    if value < min || value > max {
        return Err(BankabilityError::validation(
            field,
            format!("Must be in [{min}, {max}]"),
        ));
    }
    Ok(())
}

pub(crate) fn require_volume(field: &str, value: Volume) -> BankabilityResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_VOLUME)
}

pub(crate) fn require_years(field: &str, value: Years) -> BankabilityResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_YEARS)
}

pub(crate) fn require_percent(field: &str, value: Decimal) -> BankabilityResult<()> {
    require_range(field, value, Decimal::ZERO, HUNDRED)
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    #[default]
    Tonnes,
    Kilolitres,
    Gigajoules,
    CubicMetres,
}

/// Position of an agreement in the project's supply stack.
///
/// Tier 1 and Tier 2 agreements are firm and count as committed volume;
/// options and rights of first refusal do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementTier {
    Tier1,
    Tier2,
    Option,
    Rofr,
}

impl AgreementTier {
    pub fn is_committed(self) -> bool {
        matches!(self, AgreementTier::Tier1 | AgreementTier::Tier2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMechanism {
    Fixed,
    Indexed,
    Escalating,
    Spot,
}

impl PricingMechanism {
    /// Whether the price moves with costs over the life of the agreement.
    pub fn has_escalation_protection(self) -> bool {
        matches!(self, PricingMechanism::Indexed | PricingMechanism::Escalating)
    }
}

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One supplier's contribution to a project's feedstock supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyPosition {
    pub supplier_id: String,
    pub volume: Volume,
    #[serde(default)]
    pub unit: VolumeUnit,
    /// Per-supplier grade on a 0-10 scale, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_grade: Option<Decimal>,
}

impl SupplyPosition {
    pub fn new(
        supplier_id: impl Into<String>,
        volume: Volume,
        unit: VolumeUnit,
        quality_grade: Option<Decimal>,
    ) -> BankabilityResult<Self> {
        let position = SupplyPosition {
            supplier_id: supplier_id.into(),
            volume,
            unit,
            quality_grade,
        };
        position.validate()?;
        Ok(position)
    }

    pub fn validate(&self) -> BankabilityResult<()> {
        require_non_empty("supplier_id", &self.supplier_id)?;
        require_volume("volume", self.volume)?;
        if let Some(grade) = self.quality_grade {
            require_range("quality_grade", grade, Decimal::ZERO, MAX_GRADE)?;
        }
        Ok(())
    }
}

/// A single supply agreement as seen by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementForScoring {
    pub agreement_id: String,
    pub counterparty_id: String,
    pub tier: AgreementTier,
    pub annual_volume: Volume,
    pub term_years: Years,
    pub remaining_term_years: Years,
    /// Historical deliveries as a share of contracted volume.
    pub volume_consistency_pct: Percent,
    pub take_or_pay: bool,
    pub pricing: PricingMechanism,
    /// Either party may terminate without cause.
    pub unilateral_termination: bool,
}

impl AgreementForScoring {
    pub fn validate(&self) -> BankabilityResult<()> {
        require_non_empty("agreement_id", &self.agreement_id)?;
        require_non_empty("counterparty_id", &self.counterparty_id)?;
        require_volume("annual_volume", self.annual_volume)?;
        require_years("term_years", self.term_years)?;
        require_years("remaining_term_years", self.remaining_term_years)?;
        if self.remaining_term_years > self.term_years {
            return Err(BankabilityError::validation(
                "remaining_term_years",
                "Must not exceed term_years",
            ));
        }
        require_percent("volume_consistency_pct", self.volume_consistency_pct)
    }
}

/// Builder-style constructor so callers cannot produce an unvalidated agreement.
#[derive(Debug, Clone)]
pub struct AgreementBuilder {
    agreement: AgreementForScoring,
}

impl AgreementBuilder {
    pub fn new(
        agreement_id: impl Into<String>,
        counterparty_id: impl Into<String>,
        tier: AgreementTier,
        annual_volume: Volume,
    ) -> Self {
        AgreementBuilder {
            agreement: AgreementForScoring {
                agreement_id: agreement_id.into(),
                counterparty_id: counterparty_id.into(),
                tier,
                annual_volume,
                term_years: Decimal::ZERO,
                remaining_term_years: Decimal::ZERO,
                volume_consistency_pct: Decimal::ZERO,
                take_or_pay: false,
                pricing: PricingMechanism::Fixed,
                unilateral_termination: false,
            },
        }
    }

    pub fn term(mut self, term_years: Years, remaining_term_years: Years) -> Self {
        self.agreement.term_years = term_years;
        self.agreement.remaining_term_years = remaining_term_years;
        self
    }

    pub fn consistency(mut self, pct: Percent) -> Self {
        self.agreement.volume_consistency_pct = pct;
        self
    }

    pub fn take_or_pay(mut self, take_or_pay: bool) -> Self {
        self.agreement.take_or_pay = take_or_pay;
        self
    }

    pub fn pricing(mut self, pricing: PricingMechanism) -> Self {
        self.agreement.pricing = pricing;
        self
    }

    pub fn unilateral_termination(mut self, allowed: bool) -> Self {
        self.agreement.unilateral_termination = allowed;
        self
    }

    pub fn build(self) -> BankabilityResult<AgreementForScoring> {
        self.agreement.validate()?;
        Ok(self.agreement)
    }
}

/// Credit and track-record attributes of a supply counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyProfile {
    pub counterparty_id: String,
    /// GQ grade on a 0-10 scale, higher is better.
    pub gq_rating: Decimal,
    pub track_record_years: Years,
}

impl CounterpartyProfile {
    pub fn new(
        counterparty_id: impl Into<String>,
        gq_rating: Decimal,
        track_record_years: Years,
    ) -> BankabilityResult<Self> {
        let profile = CounterpartyProfile {
            counterparty_id: counterparty_id.into(),
            gq_rating,
            track_record_years,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> BankabilityResult<()> {
        require_non_empty("counterparty_id", &self.counterparty_id)?;
        require_range("gq_rating", self.gq_rating, Decimal::ZERO, MAX_GRADE)?;
        require_years("track_record_years", self.track_record_years)
    }
}

/// The project whose feedstock supply is being assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub project_id: String,
    pub annual_feedstock_requirement: Volume,
    #[serde(default)]
    pub unit: VolumeUnit,
}

impl ProjectProfile {
    pub fn new(
        project_id: impl Into<String>,
        annual_feedstock_requirement: Volume,
        unit: VolumeUnit,
    ) -> BankabilityResult<Self> {
        let project = ProjectProfile {
            project_id: project_id.into(),
            annual_feedstock_requirement,
            unit,
        };
        project.validate()?;
        Ok(project)
    }

    pub fn validate(&self) -> BankabilityResult<()> {
        require_non_empty("project_id", &self.project_id)?;
        if self.annual_feedstock_requirement <= Decimal::ZERO {
            return Err(BankabilityError::validation(
                "annual_feedstock_requirement",
                "Must be positive",
            ));
        }
        require_volume(
            "annual_feedstock_requirement",
            self.annual_feedstock_requirement,
        )
    }
}

/// Facility readiness indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalData {
    pub permits_obtained: u32,
    pub permits_required: u32,
    pub infrastructure_completion_pct: Percent,
    pub on_time_delivery_pct: Percent,
}

impl OperationalData {
    pub fn new(
        permits_obtained: u32,
        permits_required: u32,
        infrastructure_completion_pct: Percent,
        on_time_delivery_pct: Percent,
    ) -> BankabilityResult<Self> {
        let data = OperationalData {
            permits_obtained,
            permits_required,
            infrastructure_completion_pct,
            on_time_delivery_pct,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> BankabilityResult<()> {
        if self.permits_obtained > self.permits_required {
            return Err(BankabilityError::validation(
                "permits_obtained",
                "Must not exceed permits_required",
            ));
        }
        require_percent(
            "infrastructure_completion_pct",
            self.infrastructure_completion_pct,
        )?;
        require_percent("on_time_delivery_pct", self.on_time_delivery_pct)
    }

    /// Permits obtained as a percentage of those required. A project that
    /// needs no permits is fully permitted.
    pub fn permit_completion_pct(&self) -> Percent {
        if self.permits_required == 0 {
            return HUNDRED;
        }
        Decimal::from(self.permits_obtained) / Decimal::from(self.permits_required) * HUNDRED
    }
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    VolumeSecurity,
    CounterpartyQuality,
    ContractStructure,
    ConcentrationRisk,
    OperationalReadiness,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::VolumeSecurity,
        ScoreCategory::CounterpartyQuality,
        ScoreCategory::ContractStructure,
        ScoreCategory::ConcentrationRisk,
        ScoreCategory::OperationalReadiness,
    ];

    /// Fixed weight of the category in the composite score.
    pub fn weight(self) -> Decimal {
        match self {
            ScoreCategory::VolumeSecurity => dec!(0.30),
            ScoreCategory::CounterpartyQuality => dec!(0.25),
            ScoreCategory::ContractStructure => dec!(0.20),
            ScoreCategory::ConcentrationRisk => dec!(0.15),
            ScoreCategory::OperationalReadiness => dec!(0.10),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::VolumeSecurity => "Volume Security",
            ScoreCategory::CounterpartyQuality => "Counterparty Quality",
            ScoreCategory::ContractStructure => "Contract Structure",
            ScoreCategory::ConcentrationRisk => "Concentration Risk",
            ScoreCategory::OperationalReadiness => "Operational Readiness",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The observed value of one factor and the points it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub observed: Decimal,
    pub points: Decimal,
}

/// A category sub-score with its factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub score: Score,
    pub factors: BTreeMap<String, FactorContribution>,
}

impl CategoryScore {
    /// Sum factor points and clamp the total to [0, 100].
    pub fn from_factors(
        category: ScoreCategory,
        factors: BTreeMap<String, FactorContribution>,
    ) -> Self {
        let total: Decimal = factors.values().map(|f| f.points).sum();
        CategoryScore {
            category,
            score: clamp_score(total),
            factors,
        }
    }
}

pub fn clamp_score(value: Decimal) -> Score {
    value.max(Decimal::ZERO).min(HUNDRED)
}

// ---------------------------------------------------------------------------
// Computation envelope
// ---------------------------------------------------------------------------

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
