//! Subject aliases and fuzzy-match results.

/// Ordered set of names for one logical subject.
///
/// The canonical name plus any known aliases/abbreviations, used as the
/// query for fuzzy matching. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct SubjectAliases {
    aliases: Vec<String>,
}

impl SubjectAliases {
    /// Builds the alias set for a request.
    ///
    /// When the caller supplies no aliases, the subject name itself is the
    /// only alias; supplied aliases replace (not extend) the subject name,
    /// so callers control exactly what is matched.
    #[must_use]
    pub fn resolve(subject_name: &str, supplied: &[String]) -> Self {
        let aliases: Vec<String> = supplied
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        if aliases.is_empty() {
            Self {
                aliases: vec![subject_name.trim().to_string()],
            }
        } else {
            Self { aliases }
        }
    }

    /// The display name: the first alias in order.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.aliases.first().map_or("", String::as_str)
    }

    /// Iterates the aliases in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the set is empty (only possible with an empty subject name).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.iter().all(|a| a.is_empty())
    }
}

/// Result of locating a subject inside a document's lines.
///
/// `line_index = None` and `score = 0.0` denote "no candidate found".
/// Produced fresh per lookup; never cached across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Index of the best-matching line, if any candidate existed.
    pub line_index: Option<usize>,
    /// The best-matching line's text.
    pub matched_line: String,
    /// Partial-ratio score in [0, 100].
    pub score: f64,
}

impl MatchResult {
    /// The "no candidate found" result.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            line_index: None,
            matched_line: String::new(),
            score: 0.0,
        }
    }

    /// Whether this match is usable for extraction at the given threshold.
    #[must_use]
    pub fn meets_threshold(&self, min_score: f64) -> bool {
        self.line_index.is_some() && self.score >= min_score
    }
}
