//! Supplier concentration.
//!
//! The Herfindahl-Hirschman Index is computed on the 0-1 scale: the sum of
//! squared fractional volume shares. `n` equal suppliers give `1/n`; a single
//! supplier gives 1. An empty position set, or one whose total volume is
//! zero, yields an HHI of 0, meaning "no concentration data" rather than an
//! error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{SupplyPosition, Volume};

/// One supplier's fraction of total volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierShare {
    pub supplier_id: String,
    pub volume: Volume,
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationData {
    pub shares: Vec<SupplierShare>,
    pub supplier_count: usize,
    pub total_volume: Volume,
    pub hhi: Decimal,
    pub largest_share: Decimal,
}

impl ConcentrationData {
    pub fn empty() -> Self {
        ConcentrationData {
            shares: Vec::new(),
            supplier_count: 0,
            total_volume: Decimal::ZERO,
            hhi: Decimal::ZERO,
            largest_share: Decimal::ZERO,
        }
    }

    /// True when there was no positive volume to measure.
    pub fn is_unscored(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Derive supplier shares and the HHI from a set of supply positions.
///
/// Positions are taken as given: duplicate supplier ids are not merged, so
/// callers should aggregate per supplier beforehand.
pub fn calculate_concentration(positions: &[SupplyPosition]) -> ConcentrationData {
    let total_volume: Volume = positions.iter().map(|p| p.volume).sum();
    if positions.is_empty() || total_volume <= Decimal::ZERO {
        return ConcentrationData::empty();
    }

    let shares: Vec<SupplierShare> = positions
        .iter()
        .map(|p| SupplierShare {
            supplier_id: p.supplier_id.clone(),
            volume: p.volume,
            share: p.volume / total_volume,
        })
        .collect();

    let hhi: Decimal = shares.iter().map(|s| s.share * s.share).sum();
    let largest_share = shares
        .iter()
        .map(|s| s.share)
        .max()
        .unwrap_or(Decimal::ZERO);

    ConcentrationData {
        supplier_count: shares.len(),
        shares,
        total_volume,
        hhi,
        largest_share,
    }
}

/// Shorthand for the HHI alone.
pub fn herfindahl_index(positions: &[SupplyPosition]) -> Decimal {
    calculate_concentration(positions).hhi
}
