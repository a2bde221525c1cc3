//! Embedding generation for semantic similarity.
//!
//! Provides the [`Embedder`] capability consumed by the semantic similarity
//! scorer. The real model lives behind the `fastembed-embeddings` feature;
//! without it a deterministic hash-based pseudo-embedder keeps the semantic
//! path runnable and testable.

// Allow cast precision loss for hash-based embedding calculations.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

mod minilm;

pub use minilm::MiniLmEmbedder;

use crate::Result;

/// Embedding dimensions of all-MiniLM-L6-v2.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Trait for embedding generators.
///
/// Implementations must be deterministic for identical input: the decision
/// engine's auditability depends on repeated requests scoring identically.
pub trait Embedder: Send + Sync {
    /// Returns the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Generates an embedding for the given text.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding generation fails.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Computes cosine similarity between two embedding vectors.
///
/// Returns a value in [-1.0, 1.0], or 0.0 for mismatched or empty vectors.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
