use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use abfi_bankability_core::composite::{self, CategorySubScores};
use abfi_bankability_core::rating;

use crate::input;

/// Arguments for the composite score
#[derive(Args)]
pub struct CompositeArgs {
    /// Path to JSON file with the five sub-scores (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Volume Security sub-score (0-100)
    #[arg(long)]
    pub volume_security: Option<Decimal>,

    /// Counterparty Quality sub-score (0-100)
    #[arg(long)]
    pub counterparty_quality: Option<Decimal>,

    /// Contract Structure sub-score (0-100)
    #[arg(long)]
    pub contract_structure: Option<Decimal>,

    /// Concentration Risk sub-score (0-100)
    #[arg(long)]
    pub concentration_risk: Option<Decimal>,

    /// Operational Readiness sub-score (0-100)
    #[arg(long)]
    pub operational_readiness: Option<Decimal>,
}

#[derive(Args)]
pub struct RatingArgs {
    /// Composite score (0-100)
    #[arg(long)]
    pub score: Decimal,
}

pub fn run_composite(args: CompositeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scores: CategorySubScores = if args.input.is_some() {
        input::read_input(args.input.as_deref())?
    } else {
        CategorySubScores {
            volume_security: args
                .volume_security
                .ok_or("--volume-security is required (or provide --input)")?,
            counterparty_quality: args
                .counterparty_quality
                .ok_or("--counterparty-quality is required (or provide --input)")?,
            contract_structure: args
                .contract_structure
                .ok_or("--contract-structure is required (or provide --input)")?,
            concentration_risk: args
                .concentration_risk
                .ok_or("--concentration-risk is required (or provide --input)")?,
            operational_readiness: args
                .operational_readiness
                .ok_or("--operational-readiness is required (or provide --input)")?,
        }
    };

    scores.validate()?;

    let composite_score = composite::calculate_composite(&scores);
    let rating = rating::classify_rating(composite_score);
    Ok(serde_json::json!({
        "result": {
            "composite_score": composite_score,
            "weighted_sum": composite::weighted_sum(&scores),
            "rating": rating,
            "investment_grade": rating.is_investment_grade(),
        }
    }))
}

pub fn run_rating(args: RatingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rating = rating::classify_rating(args.score);
    Ok(serde_json::json!({
        "result": {
            "rating": rating,
            "score": args.score,
            "band_lower_bound": rating.lower_bound(),
            "investment_grade": rating.is_investment_grade(),
            "description": rating.description(),
        }
    }))
}

pub fn run_rating_bands() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::json!({ "results": rating::rating_bands() }))
}
