//! Windowed field extraction.
//!
//! Both extractors share one shape: fuzzy-locate the subject, refuse to
//! guess when the best match is below the minimum score, then run a
//! prioritized strategy list over a small window of nearby lines.
//! Structural patterns come first; the generative fallback runs last since
//! it is slower and less deterministic.

mod credits;
mod grade;
mod patterns;

pub use credits::CreditExtractor;
pub use grade::GradeExtractor;
