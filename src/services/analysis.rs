//! The analysis pipeline.

use crate::config::EngineConfig;
use crate::embedding::MiniLmEmbedder;
use crate::io::{FileTextSource, TextSource};
use crate::llm::{OllamaGenerator, TextGenerator};
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, Document, DocumentOrigin, SubjectAliases,
};
use crate::services::{
    CreditExtractor, DecisionEngine, GradeExtractor, SemanticScorer, SimilarityScorer,
    is_course_content,
};
use crate::text::normalize;
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Orchestrates one request through the whole pipeline.
///
/// Every collaborator is an injected capability: the text source, the
/// similarity scorer, and the optional generative fallback. Production wiring
/// comes from [`AnalysisService::from_config`]; tests substitute
/// deterministic stubs through the `with_*` builders.
///
/// A service instance is shared read-only across requests; each `analyze`
/// call runs one synchronous pipeline with no state carried between calls.
pub struct AnalysisService {
    config: EngineConfig,
    text_source: Arc<dyn TextSource>,
    scorer: Arc<dyn SimilarityScorer>,
    generator: Option<Arc<dyn TextGenerator>>,
    decision_engine: DecisionEngine,
}

impl AnalysisService {
    /// Builds the production service for a configuration: file-system text
    /// source, semantic scorer over the MiniLM embedder, and the Ollama
    /// generative fallback when enabled.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let generator: Option<Arc<dyn TextGenerator>> = if config.llm.enabled {
            let mut client = OllamaGenerator::new();
            if let Some(endpoint) = &config.llm.endpoint {
                client = client.with_endpoint(endpoint);
            }
            if let Some(model) = &config.llm.model {
                client = client.with_model(model);
            }
            Some(Arc::new(client))
        } else {
            None
        };

        Self {
            config: config.clone(),
            text_source: Arc::new(FileTextSource::new()),
            scorer: Arc::new(SemanticScorer::new(Arc::new(MiniLmEmbedder::new()))),
            generator,
            decision_engine: DecisionEngine::new(config),
        }
    }

    /// Replaces the text source.
    #[must_use]
    pub fn with_text_source(mut self, text_source: Arc<dyn TextSource>) -> Self {
        self.text_source = text_source;
        self
    }

    /// Replaces the similarity scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replaces (or installs) the generative fallback.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Removes the generative fallback.
    #[must_use]
    pub fn without_generator(mut self) -> Self {
        self.generator = None;
        self
    }

    /// Runs one request through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for structural problems (missing
    /// subject, missing file lists, nonexistent paths) before any extraction
    /// happens, and [`Error::Classification`] when no course-content
    /// document exists on either side. Everything downstream (extraction
    /// misses, model failures) is absorbed into the reasoning record and
    /// the call still returns a complete, decision-bearing response.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        request.validate()?;

        for path in request
            .applicant_files
            .iter()
            .chain(request.sunway_files.iter())
        {
            if !path.exists() {
                return Err(Error::InvalidInput(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
        }

        let aliases = SubjectAliases::resolve(&request.subject_name, &request.subject_aliases);

        // Split applicant inputs: course-content (syllabus) on one side,
        // everything else concatenated as the transcript.
        let mut transcript_text = String::new();
        let mut applicant_course_text: Option<String> = None;
        for path in &request.applicant_files {
            let document = self.read(path, DocumentOrigin::Applicant);
            if is_course_content(&document.raw_text) {
                applicant_course_text = Some(document.raw_text);
            } else {
                transcript_text.push_str(&document.raw_text);
                transcript_text.push('\n');
            }
        }
        let applicant_course_text = applicant_course_text.ok_or_else(|| {
            Error::Classification("no applicant course syllabus detected".to_string())
        })?;

        let mut target_course_text: Option<String> = None;
        for path in &request.sunway_files {
            let document = self.read(path, DocumentOrigin::Institution);
            if is_course_content(&document.raw_text) {
                target_course_text = Some(document.raw_text);
            }
        }
        let target_course_text = target_course_text.ok_or_else(|| {
            Error::Classification("no Sunway course syllabus detected".to_string())
        })?;

        // Grade from the transcript, credits from the applicant syllabus.
        let detected_grade = self
            .grade_extractor()
            .extract(&transcript_text, &aliases);
        let detected_credit_hours = self
            .credit_extractor()
            .extract(&applicant_course_text, &aliases);

        let normalized_applicant = normalize(&applicant_course_text);
        let normalized_target = normalize(&target_course_text);
        let similarity = match self.scorer.score(&normalized_applicant, &normalized_target) {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!(
                    strategy = self.scorer.name(),
                    error = %e,
                    "similarity scoring failed; treating as zero similarity"
                );
                0.0
            },
        };

        let (decision, reasoning, suggested_equivalent_grade) = self.decision_engine.decide(
            &request.subject_name,
            similarity,
            detected_grade,
            detected_credit_hours,
            request.is_credit_transfer(),
        );

        Ok(AnalyzeResponse {
            ai_decision: decision,
            app_type: request.app_type.clone(),
            reasoning,
            suggested_equivalent_grade,
        })
    }

    /// Reads one file fail-soft: extraction errors are logged here and the
    /// document contributes an empty string.
    fn read(&self, path: &Path, origin: DocumentOrigin) -> Document {
        let raw_text = match self.text_source.extract(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    origin = origin.as_str(),
                    error = %e,
                    "text extraction failed; continuing with empty text"
                );
                String::new()
            },
        };

        let document = Document::new(raw_text, origin);
        if document.is_empty() {
            tracing::warn!(
                path = %path.display(),
                origin = origin.as_str(),
                "document contributed no text"
            );
        }
        document
    }

    fn grade_extractor(&self) -> GradeExtractor {
        let extractor = GradeExtractor::new(&self.config);
        match &self.generator {
            Some(generator) => extractor.with_generator(Arc::clone(generator)),
            None => extractor,
        }
    }

    fn credit_extractor(&self) -> CreditExtractor {
        let extractor = CreditExtractor::new(&self.config);
        match &self.generator {
            Some(generator) => extractor.with_generator(Arc::clone(generator)),
            None => extractor,
        }
    }
}
