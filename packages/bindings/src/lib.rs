use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use abfi_bankability_core::error::parse_json;
use abfi_bankability_core::{BankabilityInput, ScoringPolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an optional policy override, falling back to the built-in policy.
fn parse_policy(policy_json: Option<String>) -> NapiResult<ScoringPolicy> {
    match policy_json {
        Some(json) => ScoringPolicy::from_json_str(&json).map_err(to_napi_error),
        None => Ok(ScoringPolicy::default()),
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Full assessment wrapped in the computation envelope (warnings, metadata).
#[napi]
pub fn assess_bankability(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let input = BankabilityInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let output =
        abfi_bankability_core::assess_bankability(&input, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The bare assessment record, as persisted by the API layer.
#[napi]
pub fn calculate_bankability_scores(
    input_json: String,
    policy_json: Option<String>,
) -> NapiResult<String> {
    let input = BankabilityInput::from_json_str(&input_json).map_err(to_napi_error)?;
    let policy = parse_policy(policy_json)?;
    let output = abfi_bankability_core::calculate_bankability_scores(&input, &policy)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_concentration(positions_json: String) -> NapiResult<String> {
    let positions: Vec<abfi_bankability_core::SupplyPosition> =
        parse_json(&positions_json).map_err(to_napi_error)?;
    for (i, position) in positions.iter().enumerate() {
        position
            .validate()
            .map_err(|e| to_napi_error(e.within(&format!("supply_positions[{i}]"))))?;
    }
    let output = abfi_bankability_core::concentration::calculate_concentration(&positions);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_composite(scores_json: String) -> NapiResult<String> {
    let scores: abfi_bankability_core::composite::CategorySubScores =
        parse_json(&scores_json).map_err(to_napi_error)?;
    scores.validate().map_err(to_napi_error)?;
    let composite = abfi_bankability_core::composite::calculate_composite(&scores);
    serde_json::to_string(&composite).map_err(to_napi_error)
}

/// Rating label for a composite score passed as a decimal string.
#[napi]
pub fn classify_rating(score: String) -> NapiResult<String> {
    let score: Decimal = score.parse().map_err(to_napi_error)?;
    Ok(abfi_bankability_core::rating::classify_rating(score).to_string())
}

#[napi]
pub fn rating_bands() -> NapiResult<String> {
    serde_json::to_string(&abfi_bankability_core::rating::rating_bands()).map_err(to_napi_error)
}

#[napi]
pub fn new_assessment_number() -> String {
    abfi_bankability_core::assessment_number::new_assessment_number()
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[napi]
pub fn default_scoring_policy() -> NapiResult<String> {
    serde_json::to_string(&ScoringPolicy::default()).map_err(to_napi_error)
}

/// Validate a policy document; returns the normalised policy JSON.
#[napi]
pub fn validate_scoring_policy(policy_json: String) -> NapiResult<String> {
    let policy = ScoringPolicy::from_json_str(&policy_json).map_err(to_napi_error)?;
    serde_json::to_string(&policy).map_err(to_napi_error)
}
