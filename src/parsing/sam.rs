use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::{bam, sam};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::cigar::adjust_position;
use crate::core::error::AnnotateError;
use crate::core::quality::average_quality;
use crate::core::types::Strand;
use crate::utils::validation::{check_position, check_record_limit};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Line {line}: {source}")]
    Annotate {
        line: usize,
        #[source]
        source: AnnotateError,
    },

    #[error("Too many records: {0} exceeds maximum allowed (100000)")]
    TooManyRecords(usize),
}

/// A 1-based record number paired with the conversion result of that record
pub type ParsedRecord = (usize, Result<AlignmentRecord, ParseError>);

/// The alignment fields needed for coordinate adjustment and quality scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentRecord {
    /// QNAME, `*` when unavailable
    pub name: String,
    /// FLAG
    pub flag: u16,
    /// 1-based leftmost mapping position, `None` when unavailable
    pub position: Option<i64>,
    /// CIGAR text, `*` or empty when unavailable
    pub cigar: String,
    /// Phred+33 encoded base qualities, `None` when unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl AlignmentRecord {
    #[must_use]
    pub fn strand(&self) -> Strand {
        Strand::from_flag(self.flag)
    }

    /// Start position adjusted for soft clipping and strand.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::InvalidPosition` if the record has no start
    /// position or the adjustment overflows, or `AnnotateError::InvalidCigar`
    /// if the CIGAR is malformed or unavailable.
    pub fn adjusted_position(&self) -> Result<i64, AnnotateError> {
        let position = self.position.ok_or_else(|| {
            AnnotateError::invalid_position(0, "alignment start is unavailable")
        })?;
        adjust_position(position, &self.cigar, self.strand())
    }

    /// Mean base quality, `None` when the record carries no qualities.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::EmptyInput` if the quality field is empty.
    pub fn mean_quality(&self) -> Option<Result<f64, AnnotateError>> {
        self.quality.as_deref().map(average_quality)
    }
}

/// Read alignment records from SAM text
///
/// The header is read and discarded. Each entry pairs the 1-based record
/// number with its conversion result, so callers can decide whether a bad
/// record aborts the run or is skipped.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the header is malformed, `ParseError::Io`
/// on a read failure, or `ParseError::TooManyRecords` if the record limit is
/// exceeded.
pub fn read_sam<R: BufRead>(inner: R) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut reader = sam::io::Reader::new(inner);
    reader.read_header().map_err(noodles_error)?;

    collect_records(reader.records(), convert_sam_record)
}

/// Parse an alignment file: BAM by extension, otherwise SAM (plain or gzip-compressed)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if the header cannot be parsed, or `ParseError::TooManyRecords` if the
/// record limit is exceeded.
pub fn parse_alignment_file(path: &Path) -> Result<Vec<ParsedRecord>, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("bam") => parse_bam_file(path),
        _ => parse_sam_file(path),
    }
}

fn parse_sam_file(path: &Path) -> Result<Vec<ParsedRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        read_sam(BufReader::new(GzDecoder::new(file)))
    } else {
        read_sam(BufReader::new(file))
    }
}

fn parse_bam_file(path: &Path) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut reader = std::fs::File::open(path).map(bam::io::Reader::new)?;
    reader.read_header().map_err(noodles_error)?;

    collect_records(reader.records(), convert_bam_record)
}

fn collect_records<T>(
    records: impl Iterator<Item = io::Result<T>>,
    convert: impl Fn(&T) -> Result<AlignmentRecord, ParseError>,
) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut parsed = Vec::new();

    for (i, result) in records.enumerate() {
        // Check record limit for DOS protection
        if check_record_limit(parsed.len()).is_some() {
            return Err(ParseError::TooManyRecords(parsed.len()));
        }

        let converted = match result {
            Ok(record) => convert(&record),
            // A malformed record has been consumed; the reader can carry on
            Err(e) if matches!(
                e.kind(),
                io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput
            ) =>
            {
                Err(noodles_error(e))
            }
            Err(e) => return Err(ParseError::Io(e)),
        };
        parsed.push((i + 1, converted));
    }

    debug!(records = parsed.len(), "Read alignment records");
    Ok(parsed)
}

fn convert_sam_record(record: &sam::Record) -> Result<AlignmentRecord, ParseError> {
    let flags = record.flags().map_err(noodles_error)?;
    let position = record
        .alignment_start()
        .transpose()
        .map_err(noodles_error)?
        .map(|start| start.get());

    let cigar = record.cigar();
    let cigar: &[u8] = cigar.as_ref();

    let scores = record.quality_scores();
    let scores: &[u8] = scores.as_ref();
    let quality = match scores {
        b"" | b"*" => None,
        raw => Some(String::from_utf8_lossy(raw).into_owned()),
    };

    Ok(AlignmentRecord {
        name: record_name(record.name().map(AsRef::<[u8]>::as_ref)),
        flag: flags.bits(),
        position: checked_position(position)?,
        cigar: String::from_utf8_lossy(cigar).into_owned(),
        quality,
    })
}

fn convert_bam_record(record: &bam::Record) -> Result<AlignmentRecord, ParseError> {
    let position = record
        .alignment_start()
        .transpose()
        .map_err(noodles_error)?
        .map(|start| start.get());

    let cigar = record
        .cigar()
        .iter()
        .map(|op| op.map(|op| format!("{}{}", op.len(), cigar_symbol(op.kind()))))
        .collect::<io::Result<String>>()
        .map_err(noodles_error)?;

    // BAM stores raw scores, 0xFF throughout when absent
    let scores: Vec<u8> = record.quality_scores().as_ref().to_vec();
    let quality = if scores.is_empty() || scores.iter().all(|&score| score == 0xff) {
        None
    } else {
        Some(scores.iter().map(|&score| phred_char(score)).collect())
    };

    Ok(AlignmentRecord {
        name: record_name(record.name().map(AsRef::<[u8]>::as_ref)),
        flag: record.flags().bits(),
        position: checked_position(position)?,
        cigar,
        quality,
    })
}

fn record_name(name: Option<&[u8]>) -> String {
    name.map_or_else(
        || "*".to_string(),
        |name| String::from_utf8_lossy(name).into_owned(),
    )
}

fn checked_position(position: Option<usize>) -> Result<Option<i64>, ParseError> {
    let Some(position) = position else {
        return Ok(None);
    };
    if let Some(msg) = check_position(position) {
        return Err(ParseError::InvalidFormat(msg));
    }
    i64::try_from(position)
        .map(Some)
        .map_err(|e| ParseError::InvalidFormat(format!("Position {position}: {e}")))
}

fn cigar_symbol(kind: Kind) -> char {
    match kind {
        Kind::Match => 'M',
        Kind::Insertion => 'I',
        Kind::Deletion => 'D',
        Kind::Skip => 'N',
        Kind::SoftClip => 'S',
        Kind::HardClip => 'H',
        Kind::Pad => 'P',
        Kind::SequenceMatch => '=',
        Kind::SequenceMismatch => 'X',
    }
}

/// Phred+33 character for a raw score
fn phred_char(score: u8) -> char {
    char::from(score.saturating_add(b'!'))
}

fn noodles_error(e: io::Error) -> ParseError {
    ParseError::Noodles(e.to_string())
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}
