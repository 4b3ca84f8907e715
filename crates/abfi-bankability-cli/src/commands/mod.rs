pub mod assess;
pub mod concentration;
pub mod policy;
pub mod scoring;

use abfi_bankability_core::ScoringPolicy;

use crate::input;

/// The policy from `--policy <file>`, or the built-in default.
pub(crate) fn load_policy(path: Option<&str>) -> Result<ScoringPolicy, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_policy(path),
        None => Ok(ScoringPolicy::default()),
    }
}
