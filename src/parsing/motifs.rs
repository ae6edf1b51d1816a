use std::path::Path;

use tracing::debug;

use crate::core::motif::{expand, Matcher};
use crate::parsing::sam::ParseError;
use crate::utils::validation::{check_motif_length, check_record_limit};

/// Parse a motif file: one motif per line
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_motif_file(path: &Path) -> Result<Vec<Matcher>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_motif_text(&content)
}

/// Parse motif text, one motif per line.
///
/// Blank lines and `#` comments are skipped and surrounding whitespace is
/// trimmed. Motif order is preserved; it determines each motif's color index.
///
/// # Errors
///
/// Returns `ParseError::Annotate` (with the 1-based line number) for a motif
/// outside the ambiguity alphabet, `ParseError::InvalidFormat` for an overlong
/// motif or when no motifs are found, or `ParseError::TooManyRecords` if the
/// limit is exceeded.
pub fn parse_motif_text(text: &str) -> Result<Vec<Matcher>, ParseError> {
    let mut matchers = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let motif = line.trim();
        if motif.is_empty() || motif.starts_with('#') {
            continue;
        }

        let line_num = i + 1;

        if let Some(msg) = check_motif_length(motif) {
            return Err(ParseError::InvalidFormat(format!("Line {line_num}: {msg}")));
        }

        if check_record_limit(matchers.len()).is_some() {
            return Err(ParseError::TooManyRecords(matchers.len()));
        }

        let matcher = expand(motif).map_err(|source| ParseError::Annotate {
            line: line_num,
            source,
        })?;
        debug!(motif = %matcher, positions = matcher.len(), "Expanded motif");
        matchers.push(matcher);
    }

    if matchers.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No motifs found in motif file".to_string(),
        ));
    }

    Ok(matchers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AnnotateError;

    #[test]
    fn test_parse_motif_text() {
        let text = "# splice motifs\nygcy\n\n  GCAUG  \ncatag\nYYYYYYYYYY\n";
        let matchers = parse_motif_text(text).unwrap();
        let patterns: Vec<&str> = matchers.iter().map(Matcher::pattern).collect();
        assert_eq!(patterns, vec!["ygcy", "GCAUG", "catag", "YYYYYYYYYY"]);
    }

    #[test]
    fn test_invalid_motif_reports_line() {
        let err = parse_motif_text("ygcy\nGCXUG\n").unwrap_err();
        match err {
            ParseError::Annotate { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, AnnotateError::InvalidMotif { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_motifs() {
        assert!(matches!(
            parse_motif_text("\n# nothing here\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_overlong_motif() {
        let text = "N".repeat(crate::utils::validation::MAX_MOTIF_LENGTH + 1);
        assert!(matches!(
            parse_motif_text(&text),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
