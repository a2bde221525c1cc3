//! Static extraction patterns.
//!
//! Each pattern is data, not control flow: adding or removing a credit
//! pattern is an edit to the table below, evaluated in priority order by the
//! extractors.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// Recognizes one grade token out of the fixed set.
///
/// Tokens are matched uppercase only and must be delimiter-bounded on both
/// sides; a case-insensitive match would turn the article "a" into grade A
/// on almost every syllabus line. Longer tokens come first in the
/// alternation so `A+` is not consumed as `A`.
pub static GRADE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[\s|;:,(\[])(A\+|A-|B\+|B-|C\+|C-|D\+|D-|EX|[ABCDFP])(?:$|[\s|;:,.)\]])",
    )
    .expect("static regex: grade token")
});

/// A credit-hour pattern with its place in the priority order.
#[derive(Debug)]
pub struct CreditPattern {
    /// The regex to match; capture group 1 is the hour count.
    pub pattern: Regex,
    /// Human-readable description of the variant.
    #[allow(dead_code)]
    pub description: &'static str,
}

/// Credit-hour patterns, highest priority first.
pub static CREDIT_PATTERNS: LazyLock<Vec<CreditPattern>> = LazyLock::new(|| {
    vec![
        CreditPattern {
            pattern: Regex::new(r"(?i)\b(\d+)\s*(?:credit\s*hours?\b|credits?\b|cr\.)")
                .expect("static regex: N credit hours"),
            description: "<N> credit hours / credits / cr.",
        },
        CreditPattern {
            pattern: Regex::new(r"(?i)\bcredits?:\s*(\d+)\b")
                .expect("static regex: credits: N"),
            description: "credit(s): <N>",
        },
        CreditPattern {
            pattern: Regex::new(r"(?i)\bCH:\s*(\d+)\b").expect("static regex: CH: N"),
            description: "CH: <N>",
        },
    ]
});
