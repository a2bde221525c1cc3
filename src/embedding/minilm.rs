//! all-MiniLM-L6-v2 embedder.
//!
//! With the `fastembed-embeddings` feature this is a real ONNX model, loaded
//! once per process and shared read-only across concurrent requests. Without
//! the feature it degrades to deterministic hash-based pseudo-embeddings so
//! the default build needs no model download.

use super::{DEFAULT_DIMENSIONS, Embedder};
use crate::{Error, Result};

#[cfg(feature = "fastembed-embeddings")]
mod native {
    use super::{DEFAULT_DIMENSIONS, Embedder, Error, Result};
    use std::sync::OnceLock;
    use std::time::Instant;

    /// Process-wide singleton for the embedding model; lazily initialized on
    /// first use and reused by every request thereafter.
    static EMBEDDING_MODEL: OnceLock<fastembed::TextEmbedding> = OnceLock::new();

    /// Semantic embedder backed by all-MiniLM-L6-v2.
    ///
    /// The first `embed` call blocks while the ONNX model loads; callers
    /// that care about first-request latency can warm it up at startup with
    /// `MiniLmEmbedder::new().embed("warmup").ok()`.
    pub struct MiniLmEmbedder {
        model_name: &'static str,
    }

    impl MiniLmEmbedder {
        /// Creates a new embedder. The model is loaded lazily on first use.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                model_name: "all-MiniLM-L6-v2",
            }
        }

        /// Returns the model name.
        #[must_use]
        pub const fn model_name(&self) -> &'static str {
            self.model_name
        }

        /// Gets or initializes the embedding model (thread-safe).
        fn get_model() -> Result<&'static fastembed::TextEmbedding> {
            if let Some(model) = EMBEDDING_MODEL.get() {
                return Ok(model);
            }

            tracing::info!("Loading embedding model (first use)...");
            let start = Instant::now();

            let options = fastembed::InitOptions::new(fastembed::EmbeddingModel::AllMiniLML6V2)
                .with_show_download_progress(false);

            let model =
                fastembed::TextEmbedding::try_new(options).map_err(|e| Error::OperationFailed {
                    operation: "load_embedding_model".to_string(),
                    cause: e.to_string(),
                })?;

            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                model = "all-MiniLM-L6-v2",
                "Embedding model loaded"
            );

            // Another thread may have won the race; use whatever is stored.
            let _ = EMBEDDING_MODEL.set(model);
            EMBEDDING_MODEL.get().ok_or_else(|| Error::OperationFailed {
                operation: "get_embedding_model".to_string(),
                cause: "model initialization race".to_string(),
            })
        }
    }

    impl Default for MiniLmEmbedder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Embedder for MiniLmEmbedder {
        fn dimensions(&self) -> usize {
            DEFAULT_DIMENSIONS
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if text.is_empty() {
                return Err(Error::InvalidInput("cannot embed empty text".to_string()));
            }

            let model = Self::get_model()?;
            let embeddings = model
                .embed(vec![text.to_string()], None)
                .map_err(|e| Error::OperationFailed {
                    operation: "embed".to_string(),
                    cause: e.to_string(),
                })?;

            embeddings
                .into_iter()
                .next()
                .ok_or_else(|| Error::OperationFailed {
                    operation: "embed".to_string(),
                    cause: "no embedding returned from model".to_string(),
                })
        }
    }
}

#[cfg(not(feature = "fastembed-embeddings"))]
mod fallback {
    use super::{DEFAULT_DIMENSIONS, Embedder, Error, Result};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// Hash-based pseudo-embedder.
    ///
    /// Deterministic and cheap, but word hashes do NOT capture meaning:
    /// "discrete mathematics" and "computer mathematics" will not embed
    /// close together. Enable the `fastembed-embeddings` feature for real
    /// semantic similarity; this fallback exists so the default build and
    /// the test suite run without a model download.
    pub struct MiniLmEmbedder {
        dimensions: usize,
    }

    impl MiniLmEmbedder {
        /// Creates a new pseudo-embedder.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                dimensions: DEFAULT_DIMENSIONS,
            }
        }

        /// Creates a pseudo-embedder with custom dimensions.
        #[must_use]
        pub const fn with_dimensions(dimensions: usize) -> Self {
            Self { dimensions }
        }

        /// Generates a deterministic pseudo-embedding from text.
        fn pseudo_embed(&self, text: &str) -> Vec<f32> {
            // Bound work on pathologically long inputs.
            const MAX_WORDS: usize = 1000;
            let mut embedding = vec![0.0f32; self.dimensions];

            for (i, word) in text.split_whitespace().take(MAX_WORDS).enumerate() {
                let mut hasher = DefaultHasher::new();
                word.hash(&mut hasher);
                let hash = hasher.finish();
                Self::distribute_hash(&mut embedding, hash, i, self.dimensions);
            }

            Self::normalize_embedding(&mut embedding);
            embedding
        }

        /// Distributes a hash value across embedding dimensions.
        fn distribute_hash(embedding: &mut [f32], hash: u64, word_idx: usize, dimensions: usize) {
            for j in 0..8 {
                let idx = ((hash >> (j * 8)) as usize + word_idx) % dimensions;
                let value = ((hash >> (j * 4)) & 0xFF) as f32 / 255.0 - 0.5;
                embedding[idx] += value;
            }
        }

        /// Normalizes an embedding vector in-place.
        fn normalize_embedding(embedding: &mut [f32]) {
            let norm_sq: f32 = embedding.iter().map(|x| x * x).sum();
            if norm_sq <= 0.0 {
                return;
            }
            let inv_norm = norm_sq.sqrt().recip();
            for v in embedding.iter_mut() {
                *v *= inv_norm;
            }
        }
    }

    impl Default for MiniLmEmbedder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Embedder for MiniLmEmbedder {
        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if text.is_empty() {
                return Err(Error::InvalidInput("cannot embed empty text".to_string()));
            }

            tracing::debug!(
                "using pseudo-embeddings (fastembed-embeddings feature not enabled)"
            );
            Ok(self.pseudo_embed(text))
        }
    }
}

#[cfg(feature = "fastembed-embeddings")]
pub use native::MiniLmEmbedder;

#[cfg(not(feature = "fastembed-embeddings"))]
pub use fallback::MiniLmEmbedder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_dimensions() {
        let embedder = MiniLmEmbedder::new();
        assert_eq!(embedder.dimensions(), DEFAULT_DIMENSIONS);
    }

    #[test]
    fn test_embed_empty_text_fails() {
        let embedder = MiniLmEmbedder::new();
        assert!(embedder.embed("").is_err());
    }

    #[cfg(not(feature = "fastembed-embeddings"))]
    mod fallback_tests {
        use super::*;

        #[test]
        fn test_embed_deterministic() {
            let embedder = MiniLmEmbedder::new();
            let text = "sets logic and proof techniques";

            let emb1 = embedder.embed(text).unwrap();
            let emb2 = embedder.embed(text).unwrap();

            for (v1, v2) in emb1.iter().zip(emb2.iter()) {
                assert!((v1 - v2).abs() < f32::EPSILON);
            }
        }

        #[test]
        fn test_embed_normalized() {
            let embedder = MiniLmEmbedder::new();
            let emb = embedder.embed("graph theory and combinatorics").unwrap();
            let magnitude: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((magnitude - 1.0).abs() < 0.01);
        }

        #[test]
        fn test_embed_different_text_differs() {
            let embedder = MiniLmEmbedder::new();
            let emb1 = embedder.embed("linear algebra").unwrap();
            let emb2 = embedder.embed("organic chemistry").unwrap();
            let different = emb1
                .iter()
                .zip(emb2.iter())
                .any(|(a, b)| (a - b).abs() > f32::EPSILON);
            assert!(different);
        }

        #[test]
        fn test_custom_dimensions() {
            let embedder = MiniLmEmbedder::with_dimensions(128);
            assert_eq!(embedder.dimensions(), 128);
            assert_eq!(embedder.embed("discrete structures").unwrap().len(), 128);
        }

        #[test]
        fn test_embed_whitespace_only_is_zero_vector() {
            let embedder = MiniLmEmbedder::new();
            // No words to hash: stays a zero vector of the right length.
            let emb = embedder.embed("   \t\n  ").unwrap();
            assert_eq!(emb.len(), DEFAULT_DIMENSIONS);
            assert!(emb.iter().all(|v| v.abs() < f32::EPSILON));
        }
    }
}
