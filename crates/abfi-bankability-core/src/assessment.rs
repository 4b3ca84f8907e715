//! Bankability assessment orchestration.
//!
//! Validates the full input set, derives each category's typed input, runs
//! the five scorers, aggregates the composite and assigns the rating. The
//! score itself is a pure function of the input and policy; only the
//! assessment number and timestamp depend on the clock and random source.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::RngCore;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assessment_number::generate_assessment_number;
use crate::composite::{calculate_composite, CategorySubScores};
use crate::concentration::calculate_concentration;
use crate::error::{parse_json, BankabilityError};
use crate::policy::ScoringPolicy;
use crate::rating::{classify_rating, BankabilityRating};
use crate::scorers::{
    score_concentration_risk, score_contract_structure, score_counterparty_quality,
    score_operational_readiness, score_volume_security, ConcentrationRiskInput,
    ContractStructureInput, CounterpartyQualityInput, OperationalReadinessInput,
    VolumeSecurityInput,
};
use crate::types::*;
use crate::BankabilityResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Everything the five scorers need for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankabilityInput {
    pub project: ProjectProfile,
    #[serde(default)]
    pub agreements: Vec<AgreementForScoring>,
    #[serde(default)]
    pub counterparties: Vec<CounterpartyProfile>,
    /// Per-supplier volumes, pre-aggregated by supplier.
    #[serde(default)]
    pub supply_positions: Vec<SupplyPosition>,
    pub operational: OperationalData,
}

impl BankabilityInput {
    /// Parse and validate a JSON input document. Missing or malformed fields
    /// fail with the path of the field, e.g. `agreements[0].term_years`.
    pub fn from_json_str(json: &str) -> BankabilityResult<Self> {
        let input: BankabilityInput = parse_json(json)?;
        input.validate()?;
        Ok(input)
    }

    /// Validate every record, reporting the first failure with its path,
    /// e.g. `agreements[2].term_years`.
    pub fn validate(&self) -> BankabilityResult<()> {
        self.project.validate().map_err(|e| e.within("project"))?;
        self.operational
            .validate()
            .map_err(|e| e.within("operational"))?;

        for (i, agreement) in self.agreements.iter().enumerate() {
            agreement
                .validate()
                .map_err(|e| e.within(&format!("agreements[{i}]")))?;
        }

        let mut seen = HashSet::new();
        for (i, cp) in self.counterparties.iter().enumerate() {
            let path = format!("counterparties[{i}]");
            cp.validate().map_err(|e| e.within(&path))?;
            if !seen.insert(cp.counterparty_id.as_str()) {
                return Err(BankabilityError::validation(
                    format!("{path}.counterparty_id"),
                    format!("Duplicate counterparty '{}'", cp.counterparty_id),
                ));
            }
        }

        for (i, position) in self.supply_positions.iter().enumerate() {
            position
                .validate()
                .map_err(|e| e.within(&format!("supply_positions[{i}]")))?;
        }
        Ok(())
    }
}

/// The complete result of one scoring run. Field set is consumed by the
/// dashboard and persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankabilityAssessment {
    pub assessment_number: String,
    pub assessed_at: DateTime<Utc>,
    pub project_id: String,
    pub volume_security: CategoryScore,
    pub counterparty_quality: CategoryScore,
    pub contract_structure: CategoryScore,
    pub concentration_risk: CategoryScore,
    pub operational_readiness: CategoryScore,
    pub composite_score: Score,
    pub rating: BankabilityRating,
}

impl BankabilityAssessment {
    pub fn category(&self, category: ScoreCategory) -> &CategoryScore {
        match category {
            ScoreCategory::VolumeSecurity => &self.volume_security,
            ScoreCategory::CounterpartyQuality => &self.counterparty_quality,
            ScoreCategory::ContractStructure => &self.contract_structure,
            ScoreCategory::ConcentrationRisk => &self.concentration_risk,
            ScoreCategory::OperationalReadiness => &self.operational_readiness,
        }
    }

    pub fn sub_scores(&self) -> CategorySubScores {
        CategorySubScores {
            volume_security: self.volume_security.score,
            counterparty_quality: self.counterparty_quality.score,
            contract_structure: self.contract_structure.score,
            concentration_risk: self.concentration_risk.score,
            operational_readiness: self.operational_readiness.score,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a project, stamping the result with the current time and a random
/// assessment number.
pub fn calculate_bankability_scores(
    input: &BankabilityInput,
    policy: &ScoringPolicy,
) -> BankabilityResult<BankabilityAssessment> {
    calculate_bankability_scores_at(input, policy, Utc::now(), &mut rand::thread_rng())
}

/// Score a project with an explicit clock reading and random source.
pub fn calculate_bankability_scores_at<R: RngCore + ?Sized>(
    input: &BankabilityInput,
    policy: &ScoringPolicy,
    now: DateTime<Utc>,
    rng: &mut R,
) -> BankabilityResult<BankabilityAssessment> {
    input.validate()?;
    policy.validate()?;

    let volume_security = score_volume_security(
        &VolumeSecurityInput::from_agreements(&input.project, &input.agreements),
        &policy.volume_security,
    );
    let counterparty_quality = score_counterparty_quality(
        &CounterpartyQualityInput::from_agreements(&input.agreements, &input.counterparties)?,
        &policy.counterparty_quality,
    );
    let contract_structure = score_contract_structure(
        &ContractStructureInput::from_agreements(&input.agreements),
        &policy.contract_structure,
    );
    let concentration = calculate_concentration(&input.supply_positions);
    let concentration_risk = score_concentration_risk(
        &ConcentrationRiskInput::from(&concentration),
        &policy.concentration_risk,
    );
    let operational_readiness = score_operational_readiness(
        &OperationalReadinessInput::from(&input.operational),
        &policy.operational_readiness,
    );

    let composite_score = calculate_composite(&CategorySubScores {
        volume_security: volume_security.score,
        counterparty_quality: counterparty_quality.score,
        contract_structure: contract_structure.score,
        concentration_risk: concentration_risk.score,
        operational_readiness: operational_readiness.score,
    });

    Ok(BankabilityAssessment {
        assessment_number: generate_assessment_number(now, rng),
        assessed_at: now,
        project_id: input.project.project_id.clone(),
        volume_security,
        counterparty_quality,
        contract_structure,
        concentration_risk,
        operational_readiness,
        composite_score,
        rating: classify_rating(composite_score),
    })
}

/// Score a project and wrap the assessment in the standard computation
/// envelope, with warnings about thin or degenerate inputs.
pub fn assess_bankability(
    input: &BankabilityInput,
    policy: &ScoringPolicy,
) -> BankabilityResult<ComputationOutput<BankabilityAssessment>> {
    let start = Instant::now();
    let assessment = calculate_bankability_scores(input, policy)?;
    let warnings = collect_warnings(input);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "category_weights": {
            "volume_security": ScoreCategory::VolumeSecurity.weight(),
            "counterparty_quality": ScoreCategory::CounterpartyQuality.weight(),
            "contract_structure": ScoreCategory::ContractStructure.weight(),
            "concentration_risk": ScoreCategory::ConcentrationRisk.weight(),
            "operational_readiness": ScoreCategory::OperationalReadiness.weight(),
        },
        "composite_rounding": "whole point, half away from zero",
        "hhi_scale": "0-1 (sum of squared volume shares)",
        "committed_tiers": ["tier1", "tier2"],
    });

    Ok(with_metadata(
        "ABFI Bankability Assessment (five-category weighted composite)",
        &assumptions,
        warnings,
        elapsed,
        assessment,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn collect_warnings(input: &BankabilityInput) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.agreements.is_empty() {
        warnings.push("No supply agreements supplied; agreement-based categories score at their floor.".into());
    }

    let volume = VolumeSecurityInput::from_agreements(&input.project, &input.agreements);
    if volume.coverage_pct() < dec!(100) {
        warnings.push(format!(
            "Committed volume covers {}% of the annual feedstock requirement.",
            volume.coverage_pct().round_dp(1)
        ));
    }

    let concentration = calculate_concentration(&input.supply_positions);
    if concentration.is_unscored() {
        warnings.push(
            "No supplier volume data; concentration risk scored as unmeasured.".into(),
        );
    } else if concentration.supplier_count == 1 {
        warnings.push("Single supplier accounts for all feedstock volume.".into());
    }

    let mixed_units = input
        .supply_positions
        .iter()
        .any(|p| p.unit != input.project.unit);
    if mixed_units {
        warnings.push(
            "Supply positions use a different unit from the project requirement; shares assume a common unit.".into(),
        );
    }

    warnings
}

// ===========================================================================
// Tests
// ===========================================================================
