//! Core data models.
//!
//! The types in this module are the nouns of the pipeline: documents and
//! their classification, subject aliases and match results, grades, and the
//! request/response contract with its reasoning record.

mod document;
mod grade;
mod matching;
mod request;

pub use document::{Document, DocumentKind, DocumentOrigin};
pub use grade::Grade;
pub use matching::{MatchResult, SubjectAliases};
pub use request::{AnalyzeRequest, AnalyzeResponse, Decision, Reasoning};
