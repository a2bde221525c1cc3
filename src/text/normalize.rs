//! Canonicalization for similarity comparison.

/// Canonicalizes text for similarity scoring.
///
/// Case-folds, strips every character outside `[a-z0-9]` and whitespace,
/// collapses whitespace runs (newlines and tabs included) to single spaces,
/// and trims. Total on any input; the empty string maps to itself.
///
/// Stripping happens before collapsing, so the output alphabet is exactly
/// `[a-z0-9 ]` with no repeated interior spaces and the function is
/// idempotent: `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    // Strip everything outside [a-z0-9] and whitespace first; a punctuation
    // character between spaces must not leave a double space behind.
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut last_was_space = true; // leading whitespace is dropped
    for c in stripped.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("Learning Outcomes: Sets, Logic & Proofs!"),
            "learning outcomes sets logic proofs"
        );
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize("a\t\tb\n\nc   d"), "a b c d");
    }

    #[test]
    fn test_punctuation_between_spaces_leaves_single_space() {
        // The failure mode of collapsing before stripping.
        assert_eq!(normalize("a . b"), "a b");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t  "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "MTH1114 Computer Mathematics 4 3.50 A+",
            "  Weekly   Schedule:\n Week 1 — Introduction ",
            "a . b",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize must be idempotent");
        }
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(normalize("café 101"), "caf 101");
    }
}
