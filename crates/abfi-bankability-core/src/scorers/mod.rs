//! The five category scorers.
//!
//! Each scorer maps a typed input record to a [`CategoryScore`] in [0, 100]
//! by applying its category's rule tables and summing the points. Scorers are
//! total over their inputs and hold no state.
//!
//! [`CategoryScore`]: crate::types::CategoryScore

pub mod concentration_risk;
pub mod contract_structure;
pub mod counterparty_quality;
pub mod operational_readiness;
pub mod volume_security;

pub use concentration_risk::{score_concentration_risk, ConcentrationRiskInput};
pub use contract_structure::{score_contract_structure, ContractStructureInput};
pub use counterparty_quality::{score_counterparty_quality, CounterpartyQualityInput};
pub use operational_readiness::{score_operational_readiness, OperationalReadinessInput};
pub use volume_security::{score_volume_security, VolumeSecurityInput};

use rust_decimal::Decimal;

use crate::policy::RuleTable;
use crate::types::FactorContribution;

pub(crate) fn factor(observed: Decimal, table: &RuleTable) -> FactorContribution {
    FactorContribution {
        observed,
        points: table.points_for(observed),
    }
}
