use clap::Args;
use serde_json::Value;

use super::load_policy;

#[derive(Args)]
pub struct PolicyArgs {
    /// Policy file to validate and print (JSON or YAML). Prints the built-in
    /// default policy when omitted.
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn run_policy(args: PolicyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = load_policy(args.policy.as_deref())?;
    Ok(serde_json::to_value(policy)?)
}
