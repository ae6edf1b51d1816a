//! Exon/intron spans from case-encoded sequence text.
//!
//! Bases are first classified into [`Feature`] tags (uppercase is exon,
//! lowercase is intron) and the tags are then collapsed into maximal runs.

use crate::core::error::AnnotateError;
use crate::core::types::{Feature, Interval};

impl Feature {
    /// Classify one base by letter case.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::MalformedSequence` for non-alphabetic characters.
    pub fn classify(base: u8, position: usize) -> Result<Self, AnnotateError> {
        if base.is_ascii_uppercase() {
            Ok(Self::Exon)
        } else if base.is_ascii_lowercase() {
            Ok(Self::Intron)
        } else {
            Err(AnnotateError::MalformedSequence(format!(
                "non-alphabetic character '{}' at position {}",
                base.escape_ascii(),
                position + 1
            )))
        }
    }
}

/// Tag every base of `sequence` with its [`Feature`].
///
/// # Errors
///
/// Returns `AnnotateError::MalformedSequence` if the sequence is empty or
/// contains a non-alphabetic character.
pub fn classify(sequence: &str) -> Result<Vec<Feature>, AnnotateError> {
    if sequence.is_empty() {
        return Err(AnnotateError::MalformedSequence(
            "sequence is empty".to_string(),
        ));
    }

    sequence
        .bytes()
        .enumerate()
        .map(|(i, base)| Feature::classify(base, i))
        .collect()
}

/// Collapse a sequence into its maximal exon and intron runs, in order.
///
/// # Errors
///
/// Same conditions as [`classify`].
pub fn feature_runs(sequence: &str) -> Result<Vec<(Feature, Interval)>, AnnotateError> {
    let tags = classify(sequence)?;

    let mut runs: Vec<(Feature, Interval)> = Vec::new();
    for (i, tag) in tags.into_iter().enumerate() {
        if let Some((current, span)) = runs.last_mut() {
            if *current == tag {
                span.end = i + 1;
                continue;
            }
        }
        runs.push((tag, Interval::new(i, i + 1)));
    }
    Ok(runs)
}

/// Locate every maximal run of uppercase (exon) bases.
///
/// # Errors
///
/// Returns `AnnotateError::MalformedSequence` if the sequence is empty or
/// contains a non-alphabetic character.
///
/// # Examples
///
/// ```
/// use motif_mark::core::features::locate_exons;
/// use motif_mark::core::types::Interval;
///
/// assert_eq!(locate_exons("aaGATCaa").unwrap(), vec![Interval::new(2, 6)]);
/// ```
pub fn locate_exons(sequence: &str) -> Result<Vec<Interval>, AnnotateError> {
    locate(sequence, Feature::Exon)
}

/// Locate every maximal run of lowercase (intron) bases.
///
/// # Errors
///
/// Same conditions as [`locate_exons`].
pub fn locate_introns(sequence: &str) -> Result<Vec<Interval>, AnnotateError> {
    locate(sequence, Feature::Intron)
}

fn locate(sequence: &str, wanted: Feature) -> Result<Vec<Interval>, AnnotateError> {
    Ok(feature_runs(sequence)?
        .into_iter()
        .filter_map(|(feature, span)| (feature == wanted).then_some(span))
        .collect())
}
