//! Decision rules and reasoning assembly.

use crate::config::EngineConfig;
use crate::models::{Decision, Grade, Reasoning};

/// Applies the fixed threshold rules to the three extracted signals.
///
/// Pure: identical inputs always yield identical outputs; any
/// non-determinism lives upstream in the embedding/generative collaborators,
/// which this engine never touches.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    min_similarity_percent: f64,
    min_passing_grade: Grade,
    min_credit_hours: u32,
}

impl DecisionEngine {
    /// Creates an engine with the configured thresholds.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            min_similarity_percent: config.min_similarity_percent,
            min_passing_grade: config.min_passing_grade,
            min_credit_hours: config.min_credit_hours,
        }
    }

    /// Combines the three signals into a decision plus its audit trail.
    ///
    /// The decision is the logical AND of the three `_ok` flags. The
    /// suggested equivalent grade is populated only for approved
    /// credit-transfer applications: the detected grade's token, or "C"
    /// when approval happened without a detected grade.
    #[must_use]
    pub fn decide(
        &self,
        subject: &str,
        similarity_percent: f64,
        detected_grade: Option<Grade>,
        detected_credit_hours: Option<u32>,
        is_credit_transfer: bool,
    ) -> (Decision, Reasoning, Option<String>) {
        let similarity_ok = similarity_percent >= self.min_similarity_percent;
        let grade_ok =
            detected_grade.is_some_and(|grade| grade.meets_requirement(self.min_passing_grade));
        let credit_ok = detected_credit_hours.is_some_and(|hours| hours >= self.min_credit_hours);

        let decision = if similarity_ok && grade_ok && credit_ok {
            Decision::Approve
        } else {
            Decision::Reject
        };

        let reasoning = Reasoning {
            subject: subject.to_string(),
            similarity_percent,
            similarity_ok,
            detected_grade,
            grade_ok,
            detected_credit_hours,
            credit_ok,
        };

        let suggested_equivalent_grade = if is_credit_transfer && decision == Decision::Approve {
            Some(
                detected_grade
                    .map_or_else(|| "C".to_string(), |grade| grade.as_str().to_string()),
            )
        } else {
            None
        };

        tracing::info!(
            subject = subject,
            decision = decision.as_str(),
            similarity_percent,
            similarity_ok,
            grade = detected_grade.map(|g| g.as_str()),
            grade_ok,
            credit_hours = detected_credit_hours,
            credit_ok,
            "decision made"
        );

        (decision, reasoning, suggested_equivalent_grade)
    }
}
