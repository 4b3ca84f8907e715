use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use abfi_bankability_core::concentration;
use abfi_bankability_core::SupplyPosition;

use crate::input;

#[derive(Args)]
pub struct ConcentrationArgs {
    /// JSON file holding either an array of supply positions or an object
    /// with a `supply_positions` array
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionsDocument {
    Bare(Vec<SupplyPosition>),
    Wrapped { supply_positions: Vec<SupplyPosition> },
}

pub fn run_concentration(args: ConcentrationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document: PositionsDocument = input::read_input(args.input.as_deref())?;
    let positions = match document {
        PositionsDocument::Bare(p) => p,
        PositionsDocument::Wrapped { supply_positions } => supply_positions,
    };
    for (i, position) in positions.iter().enumerate() {
        position
            .validate()
            .map_err(|e| e.within(&format!("supply_positions[{i}]")))?;
    }

    let result = concentration::calculate_concentration(&positions);
    tracing::debug!(hhi = %result.hhi, suppliers = result.supplier_count, "concentration computed");
    Ok(serde_json::json!({ "result": result }))
}
