//! Letter-grade extraction.

use super::patterns::GRADE_TOKEN;
use crate::config::EngineConfig;
use crate::llm::TextGenerator;
use crate::models::{Grade, SubjectAliases};
use crate::services::SubjectLocator;
use crate::text::LineIndex;
use std::sync::Arc;

/// Characters of context taken before the alias occurrence for the
/// generative snippet.
const SNIPPET_BEFORE: usize = 600;
/// Characters of context taken after the alias occurrence.
const SNIPPET_AFTER: usize = 800;
/// Snippet cap when the alias cannot be found verbatim.
const SNIPPET_FALLBACK_CAP: usize = 4000;
/// Output budget for the generative reply; a grade token is a few characters.
const MAX_REPLY_TOKENS: u32 = 16;

/// Extracts a subject's letter grade from transcript text.
pub struct GradeExtractor {
    locator: SubjectLocator,
    generator: Option<Arc<dyn TextGenerator>>,
    min_match_score: f64,
    window_radius: usize,
}

impl GradeExtractor {
    /// Creates an extractor with the configured thresholds and no
    /// generative fallback.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            locator: SubjectLocator::new(),
            generator: None,
            min_match_score: config.min_match_score,
            window_radius: config.window_radius,
        }
    }

    /// Attaches the generative fallback service.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Extracts the grade for the aliased subject.
    ///
    /// Returns `None` when the subject cannot be located above the minimum
    /// match score, or when every strategy misses. Never returns a default
    /// grade: an unlocated subject yields none-found, and a generator
    /// failure degrades to none-found as well.
    #[must_use]
    pub fn extract(&self, transcript_text: &str, aliases: &SubjectAliases) -> Option<Grade> {
        let lines = LineIndex::new(transcript_text);
        let location = self.locator.locate(&lines, aliases);
        if !location.meets_threshold(self.min_match_score) {
            tracing::debug!(
                subject = aliases.primary(),
                score = location.score,
                "subject below match threshold; no grade extracted"
            );
            return None;
        }

        // Locality first: the matched line itself, then the joined window.
        if let Some(grade) = Self::grade_in(&location.matched_line) {
            return Some(grade);
        }

        let center = location.line_index?;
        let window = lines.window(center, self.window_radius);
        if let Some(grade) = Self::grade_in(&window.joined()) {
            return Some(grade);
        }

        self.generate_grade(transcript_text, aliases)
    }

    /// Applies the grade-token pattern to a piece of text.
    fn grade_in(text: &str) -> Option<Grade> {
        GRADE_TOKEN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|token| Grade::parse(token.as_str()))
    }

    /// Generative fallback over a localized transcript snippet.
    fn generate_grade(&self, transcript_text: &str, aliases: &SubjectAliases) -> Option<Grade> {
        let generator = self.generator.as_ref()?;

        let snippet = subject_snippet(transcript_text, aliases);
        if snippet.trim().is_empty() {
            return None;
        }

        let prompt = format!(
            "You are given a snippet of a student's academic transcript.\n\
             \n\
             Task:\n\
             - Find the final letter grade the student obtained for the subject \"{}\".\n\
             - Only consider letter grades in this set: A+, A, A-, B+, B, B-, C+, C, C-, D+, D, D-, F, EX, P.\n\
             - Reply ONLY with the grade (for example: A+, B, C-, F).\n\
             - If you cannot find the grade for this subject, reply with: NONE\n\
             \n\
             Transcript snippet:\n{snippet}",
            aliases.primary(),
        );

        match generator.generate(&prompt, MAX_REPLY_TOKENS) {
            Ok(reply) => {
                let grade = parse_generated_grade(&reply);
                tracing::debug!(
                    subject = aliases.primary(),
                    provider = generator.name(),
                    found = grade.is_some(),
                    "generative grade fallback completed"
                );
                grade
            },
            Err(e) => {
                tracing::warn!(
                    subject = aliases.primary(),
                    provider = generator.name(),
                    error = %e,
                    "generative grade fallback failed; treating as none-found"
                );
                None
            },
        }
    }
}

/// A localized snippet of the transcript around the subject name.
///
/// Keeps the prompt short but relevant: up to [`SNIPPET_BEFORE`] characters
/// before and [`SNIPPET_AFTER`] after the first alias occurrence
/// (case-insensitive). When no alias occurs verbatim the transcript prefix
/// is used, capped at [`SNIPPET_FALLBACK_CAP`] characters.
fn subject_snippet(text: &str, aliases: &SubjectAliases) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut found: Option<usize> = None;
    for alias in aliases.iter() {
        let needle: Vec<char> = alias.chars().map(|c| c.to_ascii_lowercase()).collect();
        if needle.is_empty() || needle.len() > lowered.len() {
            continue;
        }
        if let Some(idx) = lowered
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
        {
            found = Some(idx);
            break;
        }
    }

    match found {
        Some(idx) => {
            let start = idx.saturating_sub(SNIPPET_BEFORE);
            let end = (idx + SNIPPET_AFTER).min(chars.len());
            chars[start..end].iter().collect()
        },
        None => chars[..chars.len().min(SNIPPET_FALLBACK_CAP)].iter().collect(),
    }
}

/// Picks the first valid grade token out of a generated reply.
///
/// The reply is upper-cased and split on whitespace and punctuation; the
/// first token inside the fixed grade set wins. Anything else, including an
/// explicit "NONE", is none-found.
fn parse_generated_grade(reply: &str) -> Option<Grade> {
    let upper = reply.to_uppercase();
    upper
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.'))
        .filter(|token| !token.is_empty())
        .find_map(Grade::parse)
}
