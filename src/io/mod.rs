//! Document text extraction.
//!
//! The pipeline never parses files itself; it consumes a [`TextSource`]
//! capability. The shipped [`FileTextSource`] reads PDFs via `pdf-extract`
//! and treats anything else as UTF-8 plain text. Extraction is fail-soft at
//! the pipeline boundary: a file that cannot be read contributes an empty
//! string, logged by the caller, never a hard failure.

use crate::{Error, Result};
use std::path::Path;

/// Trait for document text extraction.
pub trait TextSource: Send + Sync {
    /// Extracts the text content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed. Callers
    /// treat the error as "no text" and continue.
    fn extract(&self, path: &Path) -> Result<String>;
}

/// File-system text source: PDF via `pdf-extract`, UTF-8 text otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource;

impl FileTextSource {
    /// Creates a new file text source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }
}

impl TextSource for FileTextSource {
    fn extract(&self, path: &Path) -> Result<String> {
        if Self::is_pdf(path) {
            pdf_extract::extract_text(path).map_err(|e| Error::OperationFailed {
                operation: "extract_pdf_text".to_string(),
                cause: format!("{}: {e}", path.display()),
            })
        } else {
            std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
                operation: "read_text_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_plain_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CS101 Intro | 3 credit hours | A-").unwrap();

        let source = FileTextSource::new();
        let text = source.extract(file.path()).unwrap();
        assert!(text.contains("3 credit hours"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = FileTextSource::new();
        let result = source.extract(Path::new("/nonexistent/transcript.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_pdf_detection_case_insensitive() {
        assert!(FileTextSource::is_pdf(Path::new("syllabus.PDF")));
        assert!(FileTextSource::is_pdf(Path::new("syllabus.pdf")));
        assert!(!FileTextSource::is_pdf(Path::new("syllabus.txt")));
        assert!(!FileTextSource::is_pdf(Path::new("syllabus")));
    }

    #[test]
    fn test_malformed_pdf_is_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        writeln!(file, "not actually a pdf").unwrap();

        let source = FileTextSource::new();
        assert!(source.extract(file.path()).is_err());
    }
}
