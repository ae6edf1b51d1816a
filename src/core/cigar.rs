//! CIGAR parsing and strand-aware start position adjustment.
//!
//! See the SAM specification (<http://samtools.github.io/hts-specs/SAMv1.pdf>)
//! for the operation alphabet.
//!
//! ## Adjustment rules
//!
//! | Strand | Adjusted position |
//! |--------|-------------------|
//! | `+`    | `pos - leading S` (or `pos` without a leading soft clip) |
//! | `-`    | `pos + sum(M, D, N) + trailing S` (trailing S counts 0 when absent) |
//!
//! Only `M`, `D` and `N` counts are summed for the reverse strand; `=` and `X`
//! are accepted by the parser but not counted.

use crate::core::error::AnnotateError;
use crate::core::types::Strand;

/// CIGAR operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarKind {
    /// `M`: alignment match (sequence match or mismatch)
    Match,
    /// `I`: insertion to the reference
    Insertion,
    /// `D`: deletion from the reference
    Deletion,
    /// `N`: skipped region (intron)
    Skip,
    /// `S`: soft clip
    SoftClip,
    /// `H`: hard clip
    HardClip,
    /// `P`: padding
    Padding,
    /// `=`: sequence match
    SequenceMatch,
    /// `X`: sequence mismatch
    SequenceMismatch,
}

impl CigarKind {
    #[must_use]
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'M' => Some(Self::Match),
            b'I' => Some(Self::Insertion),
            b'D' => Some(Self::Deletion),
            b'N' => Some(Self::Skip),
            b'S' => Some(Self::SoftClip),
            b'H' => Some(Self::HardClip),
            b'P' => Some(Self::Padding),
            b'=' => Some(Self::SequenceMatch),
            b'X' => Some(Self::SequenceMismatch),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::Skip => 'N',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Padding => 'P',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
        }
    }
}

/// One `<count><operation>` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CigarOp {
    pub len: u32,
    pub kind: CigarKind,
}

impl CigarOp {
    #[must_use]
    pub fn new(len: u32, kind: CigarKind) -> Self {
        Self { len, kind }
    }
}

impl std::fmt::Display for CigarOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len, self.kind.symbol())
    }
}

/// Tokenize a CIGAR string into operations.
///
/// # Errors
///
/// Returns `AnnotateError::InvalidCigar` if the string is empty or `*`, an
/// operation has no count, a count has no operation, a count overflows `u32`,
/// or an operation symbol is unknown.
pub fn parse_cigar(cigar: &str) -> Result<Vec<CigarOp>, AnnotateError> {
    if cigar.is_empty() {
        return Err(AnnotateError::invalid_cigar(cigar, "CIGAR is empty"));
    }
    if cigar == "*" {
        return Err(AnnotateError::invalid_cigar(
            cigar,
            "CIGAR is unavailable ('*')",
        ));
    }

    let mut ops = Vec::new();
    let mut count: Option<u32> = None;

    for (i, c) in cigar.bytes().enumerate() {
        if c.is_ascii_digit() {
            let digit = u32::from(c - b'0');
            let next = count
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| {
                    AnnotateError::invalid_cigar(cigar, format!("count overflows at offset {i}"))
                })?;
            count = Some(next);
            continue;
        }

        let kind = CigarKind::from_symbol(c).ok_or_else(|| {
            AnnotateError::invalid_cigar(
                cigar,
                format!("unknown operation '{}' at offset {i}", c.escape_ascii()),
            )
        })?;
        let len = count.take().ok_or_else(|| {
            AnnotateError::invalid_cigar(
                cigar,
                format!("operation '{}' at offset {i} has no count", kind.symbol()),
            )
        })?;
        ops.push(CigarOp::new(len, kind));
    }

    if count.is_some() {
        return Err(AnnotateError::invalid_cigar(
            cigar,
            "trailing count without an operation",
        ));
    }

    Ok(ops)
}

/// Compute the adjusted genomic start of an alignment.
///
/// For `+` reads a leading soft clip is subtracted from `pos`. For `-` reads
/// the reference span (`M`, `D`, `N`) and any trailing soft clip are added,
/// giving the 5'-most coordinate of the read.
///
/// # Errors
///
/// Returns `AnnotateError::InvalidCigar` if the CIGAR cannot be parsed, or
/// `AnnotateError::InvalidPosition` if the adjusted position overflows `i64`.
///
/// # Examples
///
/// ```
/// use motif_mark::core::cigar::adjust_position;
/// use motif_mark::core::types::Strand;
///
/// assert_eq!(adjust_position(100, "10S90M", Strand::Forward).unwrap(), 90);
/// assert_eq!(adjust_position(100, "90M10S", Strand::Reverse).unwrap(), 200);
/// ```
pub fn adjust_position(pos: i64, cigar: &str, strand: Strand) -> Result<i64, AnnotateError> {
    let ops = parse_cigar(cigar)?;
    adjust_position_ops(pos, &ops, strand)
}

/// [`adjust_position`] over an already parsed CIGAR.
///
/// # Errors
///
/// Returns `AnnotateError::InvalidPosition` if the adjusted position overflows `i64`.
pub fn adjust_position_ops(
    pos: i64,
    ops: &[CigarOp],
    strand: Strand,
) -> Result<i64, AnnotateError> {
    let overflow = || AnnotateError::invalid_position(pos, "adjusted position overflows");

    match strand {
        Strand::Forward => match ops.first() {
            Some(op) if op.kind == CigarKind::SoftClip => {
                pos.checked_sub(i64::from(op.len)).ok_or_else(overflow)
            }
            _ => Ok(pos),
        },
        Strand::Reverse => {
            let reference_span = ops
                .iter()
                .filter(|op| {
                    matches!(
                        op.kind,
                        CigarKind::Match | CigarKind::Deletion | CigarKind::Skip
                    )
                })
                .try_fold(0i64, |acc, op| acc.checked_add(i64::from(op.len)))
                .ok_or_else(overflow)?;
            let trailing_clip = match ops.last() {
                Some(op) if op.kind == CigarKind::SoftClip => i64::from(op.len),
                _ => 0,
            };
            pos.checked_add(reference_span)
                .and_then(|p| p.checked_add(trailing_clip))
                .ok_or_else(overflow)
        }
    }
}
