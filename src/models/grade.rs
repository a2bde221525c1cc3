//! Letter grades and the passing-grade rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized letter grade.
///
/// The set is fixed: twelve ranked letter grades plus `F`, and the two
/// unranked completion tokens `EX` (exemption) and `P` (pass). The rank
/// order is a strict total order over the ranked tokens and is lookup-only
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// A+
    #[serde(rename = "A+")]
    APlus,
    /// A
    #[serde(rename = "A")]
    A,
    /// A-
    #[serde(rename = "A-")]
    AMinus,
    /// B+
    #[serde(rename = "B+")]
    BPlus,
    /// B
    #[serde(rename = "B")]
    B,
    /// B-
    #[serde(rename = "B-")]
    BMinus,
    /// C+
    #[serde(rename = "C+")]
    CPlus,
    /// C
    #[serde(rename = "C")]
    C,
    /// C-
    #[serde(rename = "C-")]
    CMinus,
    /// D+
    #[serde(rename = "D+")]
    DPlus,
    /// D
    #[serde(rename = "D")]
    D,
    /// D-
    #[serde(rename = "D-")]
    DMinus,
    /// F
    #[serde(rename = "F")]
    F,
    /// EX: exemption granted; unranked.
    #[serde(rename = "EX")]
    Ex,
    /// P: pass on a pass/fail scale; unranked.
    #[serde(rename = "P")]
    P,
}

impl Grade {
    /// Returns all grade variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::APlus,
            Self::A,
            Self::AMinus,
            Self::BPlus,
            Self::B,
            Self::BMinus,
            Self::CPlus,
            Self::C,
            Self::CMinus,
            Self::DPlus,
            Self::D,
            Self::DMinus,
            Self::F,
            Self::Ex,
            Self::P,
        ]
    }

    /// Returns the grade as its transcript token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::Ex => "EX",
            Self::P => "P",
        }
    }

    /// Parses a grade token, case-insensitively, trimming whitespace.
    ///
    /// Returns `None` for anything outside the fixed token set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "C+" => Some(Self::CPlus),
            "C" => Some(Self::C),
            "C-" => Some(Self::CMinus),
            "D+" => Some(Self::DPlus),
            "D" => Some(Self::D),
            "D-" => Some(Self::DMinus),
            "F" => Some(Self::F),
            "EX" => Some(Self::Ex),
            "P" => Some(Self::P),
            _ => None,
        }
    }

    /// Returns the grade's rank on the fixed A+ > A > ... > F order.
    ///
    /// `EX` and `P` are unranked and return `None`.
    #[must_use]
    pub const fn rank(&self) -> Option<u8> {
        match self {
            Self::APlus => Some(13),
            Self::A => Some(12),
            Self::AMinus => Some(11),
            Self::BPlus => Some(10),
            Self::B => Some(9),
            Self::BMinus => Some(8),
            Self::CPlus => Some(7),
            Self::C => Some(6),
            Self::CMinus => Some(5),
            Self::DPlus => Some(4),
            Self::D => Some(3),
            Self::DMinus => Some(2),
            Self::F => Some(1),
            Self::Ex | Self::P => None,
        }
    }

    /// Whether this grade satisfies the minimum passing grade.
    ///
    /// Ranked grades compare by rank. The unranked completion tokens `EX`
    /// and `P` always satisfy the requirement: both denote successful
    /// completion of the subject, just without a letter rank. An unranked
    /// *minimum* imposes no ranked requirement, so everything passes it.
    #[must_use]
    pub const fn meets_requirement(&self, minimum: Self) -> bool {
        match (self.rank(), minimum.rank()) {
            (Some(rank), Some(min_rank)) => rank >= min_rank,
            (None, _) | (_, None) => true,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_roundtrips() {
        for grade in Grade::all() {
            assert_eq!(Grade::parse(grade.as_str()), Some(*grade));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Grade::parse("a+"), Some(Grade::APlus));
        assert_eq!(Grade::parse(" ex "), Some(Grade::Ex));
        assert_eq!(Grade::parse("b-"), Some(Grade::BMinus));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Grade::parse("Z"), None);
        assert_eq!(Grade::parse("A++"), None);
        assert_eq!(Grade::parse(""), None);
        assert_eq!(Grade::parse("PASS"), None);
    }

    #[test]
    fn test_rank_is_strict_total_order() {
        let ranked: Vec<Grade> = Grade::all()
            .iter()
            .copied()
            .filter(|g| g.rank().is_some())
            .collect();
        for a in &ranked {
            for b in &ranked {
                if a == b {
                    continue;
                }
                let (ra, rb) = (a.rank().unwrap(), b.rank().unwrap());
                assert!(
                    (ra > rb) ^ (ra < rb),
                    "exactly one of > or < must hold for {a} vs {b}"
                );
            }
        }
    }

    #[test_case(Grade::APlus, true; "a plus passes")]
    #[test_case(Grade::C, true; "c passes at boundary")]
    #[test_case(Grade::CMinus, false; "c minus fails")]
    #[test_case(Grade::D, false; "d fails")]
    #[test_case(Grade::F, false; "f fails")]
    #[test_case(Grade::Ex, true; "exemption passes")]
    #[test_case(Grade::P, true; "pass token passes")]
    fn test_meets_requirement_against_c(grade: Grade, expected: bool) {
        assert_eq!(grade.meets_requirement(Grade::C), expected);
    }

    #[test]
    fn test_meets_requirement_matches_rank_comparison() {
        for grade in Grade::all() {
            if let (Some(rank), Some(min_rank)) = (grade.rank(), Grade::C.rank()) {
                assert_eq!(grade.meets_requirement(Grade::C), rank >= min_rank);
            }
        }
    }

    #[test]
    fn test_serde_uses_transcript_token() {
        let json = serde_json::to_string(&Grade::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
        let back: Grade = serde_json::from_str("\"EX\"").unwrap();
        assert_eq!(back, Grade::Ex);
    }
}
