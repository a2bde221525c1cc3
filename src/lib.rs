//! # Credeq
//!
//! Subject-matching and credit-equivalence decision engine.
//!
//! Credeq evaluates whether a student's completed course should be credited
//! against an equivalent course at the target institution. It locates a
//! subject inside noisy PDF-derived text, extracts the letter grade and
//! credit-hour count around the match, scores the similarity of the two
//! course descriptions, and combines the three signals into an auditable
//! approve/reject decision.
//!
//! ## Pipeline
//!
//! 1. Applicant and institution documents are classified as course-content
//!    (syllabus-like) or transcript-like.
//! 2. The subject is fuzzy-located inside the transcript (for the grade) and
//!    the applicant syllabus (for the credit hours).
//! 3. Structural patterns extract grade/credits from a window around the
//!    match, with a generative-model fallback when patterns miss.
//! 4. The two course descriptions are normalized and scored for similarity.
//! 5. Fixed threshold rules produce the decision and its reasoning record.
//!
//! ## Example
//!
//! ```rust,ignore
//! use credeq::{AnalysisService, AnalyzeRequest, EngineConfig};
//!
//! let service = AnalysisService::from_config(&EngineConfig::default());
//! let response = service.analyze(&AnalyzeRequest {
//!     subject_name: "Computer Mathematics".to_string(),
//!     applicant_files: vec!["transcript.pdf".into(), "syllabus.pdf".into()],
//!     sunway_files: vec!["target_syllabus.pdf".into()],
//!     ..Default::default()
//! })?;
//! println!("{}", response.ai_decision);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod embedding;
pub mod io;
pub mod llm;
pub mod models;
pub mod observability;
pub mod server;
pub mod services;
pub mod text;

// Re-exports for convenience
pub use config::EngineConfig;
pub use embedding::Embedder;
pub use io::{FileTextSource, TextSource};
pub use llm::TextGenerator;
pub use models::{
    AnalyzeRequest, AnalyzeResponse, Decision, Document, DocumentKind, DocumentOrigin, Grade,
    MatchResult, Reasoning, SubjectAliases,
};
pub use services::{
    AnalysisService, CreditExtractor, DecisionEngine, GradeExtractor, LexicalScorer,
    SemanticScorer, SimilarityScorer, SubjectLocator,
};

/// Error type for credeq operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// Extraction misses and collaborator (model) failures are deliberately NOT
/// represented here: they degrade to none-found / zero-similarity signals
/// inside the pipeline so that every accepted request still completes with a
/// decision-bearing response.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - `subject_name` is empty
    /// - `applicant_files` or `sunway_files` is empty
    /// - A referenced file path does not exist
    /// - JSON deserialization of a request fails
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Document classification failed.
    ///
    /// Raised when none of the applicant files (or none of the institution
    /// files) classifies as course-content: without a syllabus on both sides
    /// no meaningful similarity score exists, so the request is refused
    /// before a decision is attempted.
    #[error("document classification failed: {0}")]
    Classification(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The embedding model cannot be loaded
    /// - The generative service returns a transport-level error
    /// - The HTTP server cannot bind or serve
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for credeq operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("subject_name is required".to_string());
        assert_eq!(err.to_string(), "invalid input: subject_name is required");

        let err = Error::OperationFailed {
            operation: "embed".to_string(),
            cause: "model unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'embed' failed: model unavailable"
        );

        let err = Error::Classification("no applicant course syllabus detected".to_string());
        assert_eq!(
            err.to_string(),
            "document classification failed: no applicant course syllabus detected"
        );
    }
}
