//! Nucleotide sequence helpers, re-exported at the crate root for callers
//! that prepare or post-process sequences.

use crate::core::error::AnnotateError;

const DNA_BASES: &[u8] = b"ATGCN";
const RNA_BASES: &[u8] = b"AUGCN";

/// Check that `sequence` only contains A, T (U when `rna`), G, C or N, case-insensitive.
///
/// An empty sequence is trivially valid.
#[must_use]
pub fn validate_base_seq(sequence: &str, rna: bool) -> bool {
    let alphabet = if rna { RNA_BASES } else { DNA_BASES };
    sequence
        .bytes()
        .all(|b| alphabet.contains(&b.to_ascii_uppercase()))
}

/// Fraction of G and C bases, case-insensitive.
///
/// # Errors
///
/// Returns `AnnotateError::EmptyInput` if `sequence` is empty.
pub fn gc_content(sequence: &str) -> Result<f64, AnnotateError> {
    if sequence.is_empty() {
        return Err(AnnotateError::EmptyInput("sequence is empty".to_string()));
    }

    let gc = sequence
        .bytes()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let fraction = gc as f64 / sequence.len() as f64;
    Ok(fraction)
}

/// Complement of a single IUPAC base; case is preserved, unknown symbols pass through.
#[must_use]
pub fn complement(base: u8) -> u8 {
    let upper = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        // S, W, N and gaps are their own complement
        _ => return base,
    };
    if base.is_ascii_lowercase() {
        upper.to_ascii_lowercase()
    } else {
        upper
    }
}

/// Reverse complement of a nucleotide sequence.
///
/// # Examples
///
/// ```
/// use motif_mark::reverse_complement;
///
/// assert_eq!(reverse_complement("aaGCtY"), "RaGCtt");
/// ```
#[must_use]
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .bytes()
        .rev()
        .map(|b| complement(b) as char)
        .collect()
}
