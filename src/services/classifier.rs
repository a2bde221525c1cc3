//! Document classification.
//!
//! Splits raw documents into "course-content" (syllabus-like) and everything
//! else, which in this pipeline means transcript-like grade records. The
//! signal is keyword presence: syllabi reliably carry section headings that
//! transcripts never do, so first-keyword-found substring containment is
//! enough. No scoring.

use crate::models::DocumentKind;

/// Keywords whose presence marks a document as course-content.
const COURSE_CONTENT_KEYWORDS: &[&str] = &[
    "learning outcome",
    "course description",
    "topics",
    "prerequisite",
    "instructional methods",
    "assessment methods",
    "weekly schedule",
    "lecture plan",
    "reference materials",
];

/// Classifies a raw document.
///
/// Case-insensitive substring containment against the fixed keyword set;
/// the first hit wins. Empty text classifies as [`DocumentKind::Other`].
/// Deterministic, no side effects.
#[must_use]
pub fn classify(raw_text: &str) -> DocumentKind {
    if raw_text.is_empty() {
        return DocumentKind::Other;
    }

    let text_lower = raw_text.to_lowercase();
    for keyword in COURSE_CONTENT_KEYWORDS {
        if text_lower.contains(keyword) {
            return DocumentKind::CourseContent;
        }
    }

    DocumentKind::Other
}

/// Convenience wrapper: whether a document is course-content.
#[must_use]
pub fn is_course_content(raw_text: &str) -> bool {
    classify(raw_text) == DocumentKind::CourseContent
}
