//! The analyze request/response contract.

use super::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default application type when the caller omits it.
const DEFAULT_APPLICATION_TYPE: &str = "Credit Exemption";

/// An analysis request.
///
/// This is the boundary the core is invoked through, both by the HTTP
/// endpoint and the one-shot CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Application type; only "credit transfer" (case-insensitive) can yield
    /// a suggested equivalent grade.
    #[serde(rename = "type", default = "default_application_type")]
    pub app_type: String,
    /// The subject being evaluated.
    pub subject_name: String,
    /// Known aliases/abbreviations for the subject; defaults to the subject
    /// name itself when empty.
    #[serde(default)]
    pub subject_aliases: Vec<String>,
    /// The applicant's documents (transcript and prior course syllabus).
    pub applicant_files: Vec<PathBuf>,
    /// The target institution's documents for the equivalent course.
    pub sunway_files: Vec<PathBuf>,
}

fn default_application_type() -> String {
    DEFAULT_APPLICATION_TYPE.to_string()
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self {
            app_type: default_application_type(),
            subject_name: String::new(),
            subject_aliases: Vec::new(),
            applicant_files: Vec::new(),
            sunway_files: Vec::new(),
        }
    }
}

impl AnalyzeRequest {
    /// Validates the request's required fields.
    ///
    /// File-path existence is checked by the pipeline (it is I/O); this
    /// covers the purely structural requirements.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] naming the first missing field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.subject_name.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "subject_name is required".to_string(),
            ));
        }
        if self.applicant_files.is_empty() || self.sunway_files.is_empty() {
            return Err(crate::Error::InvalidInput(
                "applicant_files and sunway_files are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether this application can carry a suggested equivalent grade.
    #[must_use]
    pub fn is_credit_transfer(&self) -> bool {
        self.app_type.to_lowercase() == "credit transfer"
    }
}

/// The final verdict, derived purely from the three reasoning flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// All three signals satisfied.
    Approve,
    /// At least one signal not satisfied.
    Reject,
}

impl Decision {
    /// Returns the decision as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The audit trail returned to the caller.
///
/// Assembled once per request and never mutated afterwards. All numeric
/// fields serialize as plain JSON numbers/booleans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reasoning {
    /// The subject the request named.
    pub subject: String,
    /// Similarity between the two course descriptions, in [0, 100].
    pub similarity_percent: f64,
    /// Whether similarity met its threshold.
    pub similarity_ok: bool,
    /// The grade found in the transcript window, if any.
    pub detected_grade: Option<Grade>,
    /// Whether the grade met the minimum passing grade.
    pub grade_ok: bool,
    /// The credit hours found in the course-content window, if any.
    pub detected_credit_hours: Option<u32>,
    /// Whether the credit hours met the minimum.
    pub credit_ok: bool,
}

/// A complete, decision-bearing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// The verdict.
    pub ai_decision: Decision,
    /// The application type, echoed as received.
    #[serde(rename = "type")]
    pub app_type: String,
    /// The reasoning record.
    pub reasoning: Reasoning,
    /// Populated only for approved credit-transfer applications.
    pub suggested_equivalent_grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_subject_name() {
        let request = AnalyzeRequest {
            applicant_files: vec![PathBuf::from("a.pdf")],
            sunway_files: vec![PathBuf::from("b.pdf")],
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("subject_name"));
    }

    #[test]
    fn test_validate_requires_file_lists() {
        let request = AnalyzeRequest {
            subject_name: "Calculus".to_string(),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("applicant_files"));
    }

    #[test]
    fn test_is_credit_transfer_case_insensitive() {
        let mut request = AnalyzeRequest {
            app_type: "Credit Transfer".to_string(),
            ..Default::default()
        };
        assert!(request.is_credit_transfer());

        request.app_type = "CREDIT TRANSFER".to_string();
        assert!(request.is_credit_transfer());

        request.app_type = "Credit Exemption".to_string();
        assert!(!request.is_credit_transfer());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{
                "subject_name": "Computer Mathematics",
                "applicant_files": ["t.pdf"],
                "sunway_files": ["s.pdf"]
            }"#,
        )
        .unwrap();
        assert_eq!(request.app_type, "Credit Exemption");
        assert!(request.subject_aliases.is_empty());
    }

    #[test]
    fn test_reasoning_serializes_plain_values() {
        let reasoning = Reasoning {
            subject: "Calculus".to_string(),
            similarity_percent: 91.25,
            similarity_ok: true,
            detected_grade: Some(Grade::AMinus),
            grade_ok: true,
            detected_credit_hours: Some(3),
            credit_ok: true,
        };
        let value = serde_json::to_value(&reasoning).unwrap();
        assert_eq!(value["similarity_percent"], 91.25);
        assert_eq!(value["detected_grade"], "A-");
        assert_eq!(value["detected_credit_hours"], 3);
        assert_eq!(value["credit_ok"], true);
    }

    #[test]
    fn test_decision_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Decision::Approve).unwrap(),
            "\"approve\""
        );
        assert_eq!(
            serde_json::to_string(&Decision::Reject).unwrap(),
            "\"reject\""
        );
    }
}
