//! Rating ladder for the composite score.
//!
//! Bands are contiguous over [0, 100] with an inclusive lower bound, so a
//! score sitting exactly on a threshold belongs to the higher band:
//!
//! | Rating | Composite |
//! |--------|-----------|
//! | AAA    | 90 - 100  |
//! | AA     | 80 - <90  |
//! | A      | 70 - <80  |
//! | BBB    | 60 - <70  |
//! | BB     | 50 - <60  |
//! | B      | 40 - <50  |
//! | CCC    | 0 - <40   |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Score;

/// Ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BankabilityRating {
    CCC,
    B,
    BB,
    BBB,
    A,
    AA,
    AAA,
}

impl BankabilityRating {
    pub const ALL: [BankabilityRating; 7] = [
        BankabilityRating::CCC,
        BankabilityRating::B,
        BankabilityRating::BB,
        BankabilityRating::BBB,
        BankabilityRating::A,
        BankabilityRating::AA,
        BankabilityRating::AAA,
    ];

    /// Inclusive lower bound of the band.
    pub fn lower_bound(self) -> Score {
        match self {
            Self::CCC => Decimal::ZERO,
            Self::B => dec!(40),
            Self::BB => dec!(50),
            Self::BBB => dec!(60),
            Self::A => dec!(70),
            Self::AA => dec!(80),
            Self::AAA => dec!(90),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CCC => "CCC",
            Self::B => "B",
            Self::BB => "BB",
            Self::BBB => "BBB",
            Self::A => "A",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AAA => "Exceptional bankability; supply risk minimal",
            Self::AA => "Very strong bankability; minor residual supply risk",
            Self::A => "Strong bankability; supply risk well mitigated",
            Self::BBB => "Adequate bankability; lowest investment grade",
            Self::BB => "Speculative; material supply risk requires mitigation",
            Self::B => "Highly speculative; significant supply gaps",
            Self::CCC => "High risk; not bankable without restructuring",
        }
    }

    pub fn is_investment_grade(self) -> bool {
        self >= Self::BBB
    }
}

impl std::fmt::Display for BankabilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a composite score to its rating band. Scores below 0 fall into the
/// lowest band and scores above 100 into the highest.
pub fn classify_rating(score: Score) -> BankabilityRating {
    BankabilityRating::ALL
        .iter()
        .rev()
        .copied()
        .find(|r| score >= r.lower_bound())
        .unwrap_or(BankabilityRating::CCC)
}

/// One row of the rating ladder, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    pub rating: BankabilityRating,
    pub lower: Score,
    /// Exclusive, except for the top band which includes 100.
    pub upper: Score,
    pub investment_grade: bool,
    pub description: String,
}

/// The ladder from highest to lowest band.
pub fn rating_bands() -> Vec<RatingBand> {
    let mut bands: Vec<RatingBand> = BankabilityRating::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| RatingBand {
            rating: *r,
            lower: r.lower_bound(),
            upper: BankabilityRating::ALL
                .get(i + 1)
                .map(|next| next.lower_bound())
                .unwrap_or(dec!(100)),
            investment_grade: r.is_investment_grade(),
            description: r.description().to_string(),
        })
        .collect();
    bands.reverse();
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_boundaries_map_to_higher_band() {
        assert_eq!(classify_rating(dec!(90)), BankabilityRating::AAA);
        assert_eq!(classify_rating(dec!(80)), BankabilityRating::AA);
        assert_eq!(classify_rating(dec!(70)), BankabilityRating::A);
        assert_eq!(classify_rating(dec!(60)), BankabilityRating::BBB);
        assert_eq!(classify_rating(dec!(50)), BankabilityRating::BB);
        assert_eq!(classify_rating(dec!(40)), BankabilityRating::B);
        assert_eq!(classify_rating(Decimal::ZERO), BankabilityRating::CCC);
    }

    #[test]
    fn test_just_below_boundaries() {
        assert_eq!(classify_rating(dec!(89.99)), BankabilityRating::AA);
        assert_eq!(classify_rating(dec!(79.99)), BankabilityRating::A);
        assert_eq!(classify_rating(dec!(69.99)), BankabilityRating::BBB);
        assert_eq!(classify_rating(dec!(59.99)), BankabilityRating::BB);
        assert_eq!(classify_rating(dec!(49.99)), BankabilityRating::B);
        assert_eq!(classify_rating(dec!(39.99)), BankabilityRating::CCC);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify_rating(dec!(100)), BankabilityRating::AAA);
        assert_eq!(classify_rating(dec!(-5)), BankabilityRating::CCC);
        assert_eq!(classify_rating(dec!(150)), BankabilityRating::AAA);
    }

    #[test]
    fn test_every_whole_score_has_exactly_one_band() {
        for s in 0..=100 {
            let score = Decimal::from(s);
            let containing = rating_bands()
                .iter()
                .filter(|b| {
                    score >= b.lower
                        && (score < b.upper || (b.rating == BankabilityRating::AAA && score <= b.upper))
                })
                .count();
            assert_eq!(containing, 1, "score {s}");
        }
    }

    #[test]
    fn test_bands_contiguous() {
        let bands = rating_bands();
        assert_eq!(bands.first().unwrap().upper, dec!(100));
        assert_eq!(bands.last().unwrap().lower, Decimal::ZERO);
        for pair in bands.windows(2) {
            assert_eq!(pair[1].upper, pair[0].lower);
        }
    }

    #[test]
    fn test_investment_grade() {
        assert!(BankabilityRating::BBB.is_investment_grade());
        assert!(BankabilityRating::AAA.is_investment_grade());
        assert!(!BankabilityRating::BB.is_investment_grade());
    }

    #[test]
    fn test_ordering_lowest_to_highest() {
        assert!(BankabilityRating::CCC < BankabilityRating::B);
        assert!(BankabilityRating::AA < BankabilityRating::AAA);
    }

    #[test]
    fn test_rating_serializes_as_label() {
        let json = serde_json::to_string(&BankabilityRating::BBB).unwrap();
        assert_eq!(json, "\"BBB\"");
    }
}
