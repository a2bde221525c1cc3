//! Extracted documents and their classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the application a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentOrigin {
    /// Submitted by the applicant (transcripts, prior syllabi).
    Applicant,
    /// Held by the target institution (the course being matched against).
    Institution,
}

impl DocumentOrigin {
    /// Returns the origin as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Institution => "institution",
        }
    }
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two document categories the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Syllabus-like text: course descriptions, learning outcomes, schedules.
    CourseContent,
    /// Anything else, in practice transcript-like grade records.
    Other,
}

impl DocumentKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CourseContent => "course-content",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw extracted document.
///
/// Immutable once produced by the text extraction collaborator; the pipeline
/// only ever reads from it.
#[derive(Debug, Clone)]
pub struct Document {
    /// The extracted text, possibly empty when extraction failed soft.
    pub raw_text: String,
    /// Which side the document came from.
    pub origin: DocumentOrigin,
}

impl Document {
    /// Creates a new document.
    #[must_use]
    pub const fn new(raw_text: String, origin: DocumentOrigin) -> Self {
        Self { raw_text, origin }
    }

    /// Whether extraction produced any usable text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}
