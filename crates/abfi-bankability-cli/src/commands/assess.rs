use clap::Args;
use serde_json::Value;

use abfi_bankability_core::assessment::{self, BankabilityInput};

use super::load_policy;
use crate::input;

/// Arguments for a full bankability assessment
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON input file (project, agreements, counterparties,
    /// supply_positions, operational). Reads stdin when omitted.
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a scoring policy (JSON or YAML). Defaults to the built-in policy.
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = input::read_text(args.input.as_deref())?;
    let input_data = BankabilityInput::from_json_str(&raw)?;
    let policy = load_policy(args.policy.as_deref())?;

    tracing::info!(
        project_id = %input_data.project.project_id,
        agreements = input_data.agreements.len(),
        suppliers = input_data.supply_positions.len(),
        "scoring project"
    );
    let result = assessment::assess_bankability(&input_data, &policy)?;
    tracing::info!(
        assessment_number = %result.result.assessment_number,
        composite = %result.result.composite_score,
        rating = %result.result.rating,
        "assessment complete"
    );
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}
