//! Fuzzy subject location.

use crate::models::{MatchResult, SubjectAliases};
use crate::text::{LineIndex, partial_ratio};

/// Locates a subject's record inside a document's lines.
///
/// Each line is scored against every alias with a partial-ratio comparison
/// (case-insensitive); the line's score is the best alias score, and the
/// single best-scoring line across the document wins. A single global best
/// match, rather than every match above a threshold, avoids ambiguity when
/// one subject's name is a substring of another's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectLocator;

impl SubjectLocator {
    /// Creates a new locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Finds the best-matching line for the alias set.
    ///
    /// Ties keep the first-encountered (lowest index) line. Returns the
    /// no-candidate result for an empty document or an empty alias set.
    #[must_use]
    pub fn locate(&self, lines: &LineIndex, aliases: &SubjectAliases) -> MatchResult {
        if lines.is_empty() || aliases.is_empty() {
            return MatchResult::none();
        }

        let lowered_aliases: Vec<String> = aliases.iter().map(str::to_lowercase).collect();

        let mut best = MatchResult::none();
        for (index, line) in lines.lines().iter().enumerate() {
            let line_lower = line.to_lowercase();
            let score = lowered_aliases
                .iter()
                .map(|alias| partial_ratio(alias, &line_lower))
                .fold(0.0f64, f64::max);

            // Strict improvement only: ties keep the earliest line.
            if score > best.score {
                best = MatchResult {
                    line_index: Some(index),
                    matched_line: line.clone(),
                    score,
                };
            }
        }

        if best.line_index.is_none() {
            tracing::debug!(subject = aliases.primary(), "no candidate line found");
        } else {
            tracing::debug!(
                subject = aliases.primary(),
                line_index = best.line_index,
                score = best.score,
                "subject located"
            );
        }

        best
    }
}
