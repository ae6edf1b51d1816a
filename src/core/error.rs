use thiserror::Error;

/// Errors raised by the core annotation functions.
///
/// All variants describe malformed input data. None of them are transient,
/// so callers either skip the offending record or abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("Invalid motif '{motif}': {reason}")]
    InvalidMotif { motif: String, reason: String },

    #[error("Invalid CIGAR '{cigar}': {reason}")]
    InvalidCigar { cigar: String, reason: String },

    #[error("Invalid position {position}: {reason}")]
    InvalidPosition { position: i64, reason: String },

    #[error("Invalid strand '{0}': expected '+' or '-'")]
    InvalidStrand(String),

    #[error("Malformed sequence: {0}")]
    MalformedSequence(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl AnnotateError {
    pub(crate) fn invalid_motif(motif: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMotif {
            motif: motif.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_cigar(cigar: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCigar {
            cigar: cigar.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_position(position: i64, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            position,
            reason: reason.into(),
        }
    }
}
