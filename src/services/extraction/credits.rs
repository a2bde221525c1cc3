//! Credit-hour extraction.

use super::patterns::CREDIT_PATTERNS;
use crate::config::EngineConfig;
use crate::llm::TextGenerator;
use crate::models::SubjectAliases;
use crate::services::SubjectLocator;
use crate::text::LineIndex;
use regex::Regex;
use std::sync::Arc;
use std::sync::LazyLock;

/// Output budget for the generative reply; the answer is one number.
const MAX_REPLY_TOKENS: u32 = 50;

/// First integer in a generated reply.
#[allow(clippy::expect_used)]
static REPLY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex: reply number"));

/// Extracts a subject's credit-hour count from course-content text.
pub struct CreditExtractor {
    locator: SubjectLocator,
    generator: Option<Arc<dyn TextGenerator>>,
    min_match_score: f64,
    window_radius: usize,
}

impl CreditExtractor {
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

    /// Extracts the credit hours for the aliased subject.
    ///
    /// Returns `None` when the subject cannot be located above the minimum
    /// match score or when every strategy misses. Malformed numeric captures
    /// (out of `u32` range) are discarded as no-match, never coerced to
    /// zero, and fall through to the next pattern or line.
    #[must_use]
    pub fn extract(&self, course_text: &str, aliases: &SubjectAliases) -> Option<u32> {
        let lines = LineIndex::new(course_text);
        let location = self.locator.locate(&lines, aliases);
        if !location.meets_threshold(self.min_match_score) {
            tracing::debug!(
                subject = aliases.primary(),
                score = location.score,
                "subject below match threshold; no credits extracted"
            );
            return None;
        }

        let center = location.line_index?;
        let window = lines.window(center, self.window_radius);

        // Lines outer, patterns inner: a nearer line with a lower-priority
        // pattern beats a farther line with a higher-priority one.
        for line in window.lines() {
            for credit_pattern in CREDIT_PATTERNS.iter() {
                let Some(caps) = credit_pattern.pattern.captures(line) else {
                    continue;
                };
                if let Some(hours) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                    return Some(hours);
                }
            }
        }

        self.generate_credits(&window.joined(), aliases)
    }

    /// Generative fallback over the bounded window text.
    fn generate_credits(&self, window_text: &str, aliases: &SubjectAliases) -> Option<u32> {
        let generator = self.generator.as_ref()?;
        if window_text.trim().is_empty() {
            return None;
        }

        let prompt = format!(
            "Extract the CREDIT HOURS for the subject \"{}\" from the text below.\n\
             - Reply ONLY with the number.\n\
             - If you cannot find the credit hours, reply with: NONE\n\
             \n\
             Text:\n{window_text}",
            aliases.primary(),
        );

        match generator.generate(&prompt, MAX_REPLY_TOKENS) {
            Ok(reply) => {
                let hours = parse_generated_credits(&reply);
                tracing::debug!(
                    subject = aliases.primary(),
                    provider = generator.name(),
                    found = hours.is_some(),
                    "generative credit fallback completed"
                );
                hours
            },
            Err(e) => {
                tracing::warn!(
                    subject = aliases.primary(),
                    provider = generator.name(),
                    error = %e,
                    "generative credit fallback failed; treating as none-found"
                );
                None
            },
        }
    }
}

/// Picks the first integer out of a generated reply.
///
/// Unit words the model tends to echo ("credit hours", "credits") are
/// ignored by construction since only digit runs are considered; a reply
/// whose first digit run overflows `u32` is discarded as none-found.
fn parse_generated_credits(reply: &str) -> Option<u32> {
    REPLY_NUMBER
        .find(reply)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    struct FixedReply(&'static str);

    impl TextGenerator for FixedReply {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn aliases(name: &str) -> SubjectAliases {
        SubjectAliases::resolve(name, &[])
    }

    fn extractor() -> CreditExtractor {
        CreditExtractor::new(&EngineConfig::default())
    }

    #[test]
    fn test_first_pattern_on_matched_line() {
        let text = "CS101 Intro | 3 credit hours | A-";
        assert_eq!(extractor().extract(text, &aliases("Intro")), Some(3));
    }

    #[test]
    fn test_pattern_in_nearby_line() {
        let text = "Module: Computer Mathematics\nLevel: Year 1\nCredits: 4";
        assert_eq!(
            extractor().extract(text, &aliases("Computer Mathematics")),
            Some(4)
        );
    }

    #[test]
    fn test_ch_pattern() {
        let text = "Computer Mathematics\nCH: 3";
        assert_eq!(
            extractor().extract(text, &aliases("Computer Mathematics")),
            Some(3)
        );
    }

    #[test]
    fn test_nearer_line_wins_over_pattern_priority() {
        // Line order beats pattern order: "CH: 2" sits above "4 credit hours".
        let text = "Computer Mathematics\nCH: 2\n4 credit hours total";
        assert_eq!(
            extractor().extract(text, &aliases("Computer Mathematics")),
            Some(2)
        );
    }

    #[test]
    fn test_unlocated_subject_yields_none() {
        let text = "Module: Fine Arts\nCredits: 3";
        assert_eq!(extractor().extract(text, &aliases("Thermodynamics")), None);
    }

    #[test]
    fn test_overflowing_capture_falls_through() {
        let text = "Computer Mathematics\n99999999999999999999 credit hours\nCredits: 3";
        assert_eq!(
            extractor().extract(text, &aliases("Computer Mathematics")),
            Some(3)
        );
    }

    #[test]
    fn test_no_pattern_no_generator_yields_none() {
        let text = "Computer Mathematics\nA foundational module.";
        assert_eq!(
            extractor().extract(text, &aliases("Computer Mathematics")),
            None
        );
    }

    #[test]
    fn test_generative_fallback() {
        let text = "Computer Mathematics\nA foundational module.";
        let credits = extractor()
            .with_generator(Arc::new(FixedReply("3 credit hours")))
            .extract(text, &aliases("Computer Mathematics"));
        assert_eq!(credits, Some(3));
    }

    #[test]
    fn test_generative_none_reply() {
        let text = "Computer Mathematics\nA foundational module.";
        let credits = extractor()
            .with_generator(Arc::new(FixedReply("NONE")))
            .extract(text, &aliases("Computer Mathematics"));
        assert_eq!(credits, None);
    }

    #[test]
    fn test_parse_generated_credits() {
        assert_eq!(parse_generated_credits("3"), Some(3));
        assert_eq!(parse_generated_credits("4 credit hours"), Some(4));
        assert_eq!(parse_generated_credits("NONE"), None);
        assert_eq!(parse_generated_credits(""), None);
        assert_eq!(parse_generated_credits("99999999999999999999"), None);
    }
}
