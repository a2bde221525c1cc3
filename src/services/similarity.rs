//! Course-content similarity scoring.
//!
//! One interface, two interchangeable strategies: semantic embedding
//! comparison (primary) and lexical TF-IDF comparison (for tests and
//! deployments without an embedding model). The decision engine never knows
//! which ran.

use crate::Result;
use crate::embedding::{Embedder, cosine_similarity};
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for similarity scorers.
///
/// `score` returns a value in [0, 100] with two-decimal precision. Empty
/// input on either side scores 0.0: missing text is "no match", not an
/// error.
pub trait SimilarityScorer: Send + Sync {
    /// The strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Scores the similarity of two normalized course-content texts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model fails; callers degrade the
    /// error to zero similarity.
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64>;
}

/// Rescales a cosine similarity to [0, 100] at two-decimal precision.
///
/// Cosine values below zero clamp to 0: the contract range is [0, 100] and
/// anti-similar course descriptions are simply "not similar".
fn rescale(cosine: f64) -> f64 {
    let percent = (cosine * 100.0).clamp(0.0, 100.0);
    (percent * 100.0).round() / 100.0
}

/// Semantic similarity via the embedding capability.
pub struct SemanticScorer {
    embedder: Arc<dyn Embedder>,
}

impl SemanticScorer {
    /// Creates a scorer over the given embedder.
    #[must_use]
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

impl SimilarityScorer for SemanticScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn score(&self, text_a: &str, text_b: &str) -> Result<f64> {
        if text_a.is_empty() || text_b.is_empty() {
            return Ok(0.0);
        }

        let emb_a = self.embedder.embed(text_a)?;
        let emb_b = self.embedder.embed(text_b)?;
        Ok(rescale(f64::from(cosine_similarity(&emb_a, &emb_b))))
    }
}

/// Lexical similarity via TF-IDF over the two-document corpus.
///
/// Term frequencies are weighted by smoothed inverse document frequency
/// (`ln((1 + n) / (1 + df)) + 1` with `n = 2`), vectors L2-normalized, then
/// compared by cosine. Identical texts score 100.00 exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    /// Creates a lexical scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Term counts for one document.
    fn term_counts(text: &str) -> HashMap<&str, f64> {
        let mut counts: HashMap<&str, f64> = HashMap::new();
        for token in text.split_whitespace() {
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl SimilarityScorer for LexicalScorer {
    fn name(&self) -> &'static str {
        "lexical"
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64> {
        if text_a.is_empty() || text_b.is_empty() {
            return Ok(0.0);
        }

        let counts_a = Self::term_counts(text_a);
        let counts_b = Self::term_counts(text_b);
        if counts_a.is_empty() || counts_b.is_empty() {
            return Ok(0.0);
        }

        // Document frequency over the two-document corpus.
        let mut vocabulary: Vec<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let total_docs = 2.0f64;
        let mut vec_a = Vec::with_capacity(vocabulary.len());
        let mut vec_b = Vec::with_capacity(vocabulary.len());
        for term in &vocabulary {
            let in_a = counts_a.contains_key(term);
            let in_b = counts_b.contains_key(term);
            let df = f64::from(u8::from(in_a)) + f64::from(u8::from(in_b));
            let idf = ((1.0 + total_docs) / (1.0 + df)).ln() + 1.0;
            vec_a.push(counts_a.get(term).copied().unwrap_or(0.0) * idf);
            vec_b.push(counts_b.get(term).copied().unwrap_or(0.0) * idf);
        }

        let dot: f64 = vec_a.iter().zip(vec_b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f64 = vec_a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b: f64 = vec_b.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return Ok(0.0);
        }

        Ok(rescale(dot / (norm_a * norm_b)))
    }
}
