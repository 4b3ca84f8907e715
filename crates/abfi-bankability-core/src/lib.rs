//! Bankability scoring engine for bioenergy feedstock supply projects.
//!
//! Supply agreements, counterparties, supplier positions and operational
//! readiness data flow through five independent category scorers whose
//! results are combined into a 0-100 composite score and a rating band.
//! Every operation is a pure function of its inputs; only the assessment
//! number and timestamp read the clock and a random source.

pub mod assessment;
pub mod assessment_number;
pub mod composite;
pub mod concentration;
pub mod error;
pub mod policy;
pub mod rating;
pub mod scorers;
pub mod types;
pub mod weighted;

pub use assessment::{
    assess_bankability, calculate_bankability_scores, calculate_bankability_scores_at,
    BankabilityAssessment, BankabilityInput,
};
pub use error::BankabilityError;
pub use policy::ScoringPolicy;
pub use rating::BankabilityRating;
pub use types::*;

/// Standard result type for all bankability operations
pub type BankabilityResult<T> = Result<T, BankabilityError>;
