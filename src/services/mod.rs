//! Analysis services.
//!
//! The pipeline stages, leaf-first: document classification, fuzzy subject
//! location, windowed field extraction, similarity scoring, and the decision
//! rules, orchestrated by [`AnalysisService`].

mod analysis;
mod classifier;
mod decision;
mod extraction;
mod locator;
mod similarity;

pub use analysis::AnalysisService;
pub use classifier::{classify, is_course_content};
pub use decision::DecisionEngine;
pub use extraction::{CreditExtractor, GradeExtractor};
pub use locator::SubjectLocator;
pub use similarity::{LexicalScorer, SemanticScorer, SimilarityScorer};
