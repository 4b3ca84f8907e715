//! Human-readable assessment identifiers.
//!
//! Format: `BA-YYYYMMDD-HHMMSSmmm-XXXXXXXX`, where the date and time are UTC
//! to the millisecond and `XXXXXXXX` is 32 bits drawn from a caller-supplied
//! random source. Two numbers issued within the same millisecond collide
//! only if the random suffixes do.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::BankabilityError;
use crate::BankabilityResult;

pub const ASSESSMENT_PREFIX: &str = "BA";

/// Build an assessment number from an explicit clock reading and random
/// source.
pub fn generate_assessment_number<R: RngCore + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!(
        "{}-{}-{:08X}",
        ASSESSMENT_PREFIX,
        now.format("%Y%m%d-%H%M%S%3f"),
        rng.next_u32()
    )
}

/// Assessment number for the current instant, using the thread RNG.
pub fn new_assessment_number() -> String {
    generate_assessment_number(Utc::now(), &mut rand::thread_rng())
}

/// The parts of a parsed assessment number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentNumberParts {
    pub issued_at: DateTime<Utc>,
    pub suffix: u32,
}

pub fn parse_assessment_number(number: &str) -> BankabilityResult<AssessmentNumberParts> {
    let invalid = |reason: &str| BankabilityError::validation("assessment_number", reason);

    let parts: Vec<&str> = number.split('-').collect();
    let [prefix, date, time, suffix] = parts.as_slice() else {
        return Err(invalid("Expected four '-' separated segments"));
    };
    if *prefix != ASSESSMENT_PREFIX {
        return Err(invalid("Unknown prefix"));
    }
    if date.len() != 8 || time.len() != 9 || suffix.len() != 8 {
        return Err(invalid("Malformed segment length"));
    }
    if !time.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("Malformed time"));
    }

    let (hms, millis) = time.split_at(6);
    let naive = NaiveDateTime::parse_from_str(&format!("{date}{hms}"), "%Y%m%d%H%M%S")
        .map_err(|_| invalid("Malformed date or time"))?;
    let millis: i64 = millis.parse().map_err(|_| invalid("Malformed milliseconds"))?;
    let suffix = u32::from_str_radix(suffix, 16).map_err(|_| invalid("Malformed suffix"))?;

    Ok(AssessmentNumberParts {
        issued_at: (naive + Duration::milliseconds(millis)).and_utc(),
        suffix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap() + Duration::milliseconds(589)
    }

    #[test]
    fn test_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = generate_assessment_number(fixed_time(), &mut rng);
        assert!(number.starts_with("BA-20260314-092653589-"), "{number}");
        assert_eq!(number.len(), "BA-20260314-092653589-".len() + 8);
    }

    #[test]
    fn test_same_instant_distinct_suffixes() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = generate_assessment_number(fixed_time(), &mut rng);
        let b = generate_assessment_number(fixed_time(), &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let a = generate_assessment_number(fixed_time(), &mut StdRng::seed_from_u64(3));
        let b = generate_assessment_number(fixed_time(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rapid_succession_distinct() {
        let a = new_assessment_number();
        let b = new_assessment_number();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_roundtrip() {
        let mut rng = StdRng::seed_from_u64(11);
        let number = generate_assessment_number(fixed_time(), &mut rng);
        let parts = parse_assessment_number(&number).unwrap();
        assert_eq!(parts.issued_at, fixed_time());
        assert_eq!(format!("{:08X}", parts.suffix), &number[number.len() - 8..]);
    }

    #[test]
    fn test_parse_rejects_bad_prefix() {
        let err = parse_assessment_number("XX-20260314-092653589-0000ABCD").unwrap_err();
        assert_eq!(err.field(), Some("assessment_number"));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(parse_assessment_number("BA-20261314-092653589-0000ABCD").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        assert!(parse_assessment_number("BA-20260314-0000ABCD").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex_suffix() {
        assert!(parse_assessment_number("BA-20260314-092653589-0000ABCG").is_err());
    }
}
