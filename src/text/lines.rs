//! Line index and extraction windows.

/// A document's text split into non-empty, whitespace-trimmed lines.
///
/// Line order is meaningful: adjacency defines the extraction window around
/// a located subject line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<String>,
}

impl LineIndex {
    /// Builds the index from raw document text.
    ///
    /// Blank lines are dropped and the remaining lines trimmed, matching how
    /// transcripts render after PDF extraction (runs of empty lines between
    /// records carry no adjacency information).
    #[must_use]
    pub fn new(raw_text: &str) -> Self {
        let lines = raw_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect();
        Self { lines }
    }

    /// The indexed lines, in document order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of indexed lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document had no usable lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A read-only window of `radius` lines on each side of `center`.
    ///
    /// Clamped at the document edges, so a match on the first line yields a
    /// window starting at line 0.
    #[must_use]
    pub fn window(&self, center: usize, radius: usize) -> ExtractionWindow<'_> {
        let start = center.saturating_sub(radius);
        let end = (center + radius + 1).min(self.lines.len());
        ExtractionWindow {
            lines: &self.lines[start.min(end)..end],
        }
    }
}

/// A contiguous read-only slice of a [`LineIndex`] centered on a match.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionWindow<'a> {
    lines: &'a [String],
}

impl ExtractionWindow<'_> {
    /// The window's lines, in document order.
    #[must_use]
    pub const fn lines(&self) -> &[String] {
        self.lines
    }

    /// The window joined into one string, for whole-window pattern passes.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}
