//! Volume-weighted averages over supply agreements.

use rust_decimal::Decimal;

use crate::types::{AgreementForScoring, Years};

/// `sum(value * weight) / sum(weight)`; 0 when the total weight is zero.
pub fn weighted_average(pairs: &[(Decimal, Decimal)]) -> Decimal {
    let total_weight: Decimal = pairs.iter().map(|(_, w)| *w).sum();
    if total_weight.is_zero() {
        return Decimal::ZERO;
    }
    let weighted_sum: Decimal = pairs.iter().map(|(v, w)| *v * *w).sum();
    weighted_sum / total_weight
}

/// Remaining contract term weighted by annual volume.
pub fn weighted_average_term<'a>(
    agreements: impl IntoIterator<Item = &'a AgreementForScoring>,
) -> Years {
    let pairs: Vec<(Decimal, Decimal)> = agreements
        .into_iter()
        .map(|a| (a.remaining_term_years, a.annual_volume))
        .collect();
    weighted_average(&pairs)
}

/// Counterparty GQ rating weighted by the volume contracted with it.
///
/// Takes `(gq_rating, volume)` pairs; resolving agreements to counterparties
/// is the caller's concern.
pub fn weighted_average_gq(ratings: &[(Decimal, Decimal)]) -> Decimal {
    weighted_average(ratings)
}
