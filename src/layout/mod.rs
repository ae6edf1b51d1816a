//! Per-record feature layout consumed by renderers.
//!
//! [`LayoutBuilder`] carries the running state a renderer needs (the vertical
//! offset of the next track, the motif palette) explicitly, so each record's
//! [`RecordLayout`] depends only on the builder and the record itself.
//!
//! ## Example
//!
//! ```
//! use motif_mark::core::motif::expand;
//! use motif_mark::layout::LayoutBuilder;
//!
//! let motifs = vec![expand("YGCY").unwrap(), expand("GCAUG").unwrap()];
//! let mut builder = LayoutBuilder::new(&motifs);
//! builder.push_record("gene1", "ttgcatGCATGcctgc").unwrap();
//!
//! let layout = builder.finish();
//! assert_eq!(layout.records[0].exons.len(), 1);
//! assert_eq!(layout.legend.len(), 2);
//! ```

use serde::Serialize;

use crate::core::error::AnnotateError;
use crate::core::features::feature_runs;
use crate::core::motif::Matcher;
use crate::core::scanner::find_all;
use crate::core::sequence::gc_content;
use crate::core::types::{Feature, Interval};

/// Motif colors as RGB fractions, indexed by motif order
pub const PALETTE: [[f64; 3]; 5] = [
    [0.50, 0.70, 0.52],
    [0.97, 0.36, 0.01],
    [0.95, 0.77, 0.06],
    [0.42, 0.81, 0.96],
    [0.99, 0.39, 0.64],
];

/// Vertical offset of the first track
pub const FIRST_TRACK_OFFSET: u32 = 50;

/// Vertical distance between consecutive tracks
pub const TRACK_SPACING: u32 = 75;

/// RGB color for a motif index; wraps past the end of [`PALETTE`].
#[must_use]
pub fn palette_color(color_index: usize) -> [f64; 3] {
    PALETTE[color_index % PALETTE.len()]
}

/// Hits of one motif on one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotifTrack {
    /// Motif text as supplied
    pub motif: String,
    pub color_index: usize,
    pub spans: Vec<Interval>,
}

/// Everything a renderer needs to draw one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordLayout {
    pub header: String,
    /// Vertical offset of this record's track
    pub offset: u32,
    /// Whole record, `(0, length)`
    pub gene: Interval,
    /// Fraction of G and C bases
    pub gc_content: f64,
    pub exons: Vec<Interval>,
    pub introns: Vec<Interval>,
    pub motifs: Vec<MotifTrack>,
}

impl RecordLayout {
    /// Total number of motif hits across all motifs
    #[must_use]
    pub fn motif_hit_count(&self) -> usize {
        self.motifs.iter().map(|m| m.spans.len()).sum()
    }
}

/// Legend label for one motif
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub motif: String,
    pub color_index: usize,
    pub color: [f64; 3],
}

/// Finished layout for a whole input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub records: Vec<RecordLayout>,
    pub legend: Vec<LegendEntry>,
}

/// Accumulates [`RecordLayout`]s for a fixed motif list.
#[derive(Debug)]
pub struct LayoutBuilder<'a> {
    matchers: &'a [Matcher],
    next_offset: u32,
    records: Vec<RecordLayout>,
}

impl<'a> LayoutBuilder<'a> {
    #[must_use]
    pub fn new(matchers: &'a [Matcher]) -> Self {
        Self {
            matchers,
            next_offset: FIRST_TRACK_OFFSET,
            records: Vec::new(),
        }
    }

    /// Number of records laid out so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lay out one record and advance the track offset.
    ///
    /// A rejected record leaves the builder unchanged, so callers may skip it
    /// and continue.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::MalformedSequence` if the sequence is empty or
    /// contains a non-alphabetic character.
    pub fn push_record(
        &mut self,
        header: impl Into<String>,
        sequence: &str,
    ) -> Result<&RecordLayout, AnnotateError> {
        let record = layout_record(header.into(), sequence, self.matchers, self.next_offset)?;
        self.next_offset += TRACK_SPACING;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Finish the layout and attach the legend.
    #[must_use]
    pub fn finish(self) -> Layout {
        Layout {
            legend: legend(self.matchers),
            records: self.records,
        }
    }
}

/// Lay out a single record at a given track offset.
///
/// # Errors
///
/// Returns `AnnotateError::MalformedSequence` if the sequence is empty or
/// contains a non-alphabetic character.
pub fn layout_record(
    header: String,
    sequence: &str,
    matchers: &[Matcher],
    offset: u32,
) -> Result<RecordLayout, AnnotateError> {
    let mut exons = Vec::new();
    let mut introns = Vec::new();
    for (feature, span) in feature_runs(sequence)? {
        match feature {
            Feature::Exon => exons.push(span),
            Feature::Intron => introns.push(span),
        }
    }

    let gc_content = gc_content(sequence)?;

    let motifs = matchers
        .iter()
        .enumerate()
        .map(|(color_index, matcher)| MotifTrack {
            motif: matcher.pattern().to_string(),
            color_index,
            spans: find_all(matcher, sequence).collect(),
        })
        .collect();

    Ok(RecordLayout {
        header,
        offset,
        gene: Interval::new(0, sequence.len()),
        gc_content,
        exons,
        introns,
        motifs,
    })
}

/// Legend entries in motif order.
#[must_use]
pub fn legend(matchers: &[Matcher]) -> Vec<LegendEntry> {
    matchers
        .iter()
        .enumerate()
        .map(|(color_index, matcher)| LegendEntry {
            motif: matcher.pattern().to_string(),
            color_index,
            color: palette_color(color_index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motif::expand;

    fn motifs(patterns: &[&str]) -> Vec<Matcher> {
        patterns.iter().map(|p| expand(p).unwrap()).collect()
    }

    #[test]
    fn test_record_layout_spans() {
        let matchers = motifs(&["ygcy", "GCAUG"]);
        let record =
            layout_record("r1".to_string(), "ttgcatGCATGcctgc", &matchers, 50).unwrap();

        assert_eq!(record.gene, Interval::new(0, 16));
        assert!((record.gc_content - 0.5625).abs() < f64::EPSILON);
        assert_eq!(record.exons, vec![Interval::new(6, 11)]);
        assert_eq!(
            record.introns,
            vec![Interval::new(0, 6), Interval::new(11, 16)]
        );

        assert_eq!(record.motifs.len(), 2);
        assert_eq!(record.motifs[0].motif, "ygcy");
        assert_eq!(record.motifs[0].color_index, 0);
        assert_eq!(record.motifs[0].spans, vec![Interval::new(9, 13)]);
        assert_eq!(record.motifs[1].color_index, 1);
        // overlapping hits at gcatG and GCATG
        assert_eq!(
            record.motifs[1].spans,
            vec![Interval::new(2, 7), Interval::new(6, 11)]
        );
        assert_eq!(record.motif_hit_count(), 3);
    }

    #[test]
    fn test_builder_advances_offsets() {
        let matchers = motifs(&["A"]);
        let mut builder = LayoutBuilder::new(&matchers);
        builder.push_record("r1", "acgT").unwrap();
        builder.push_record("r2", "ACGT").unwrap();
        builder.push_record("r3", "acgt").unwrap();

        let layout = builder.finish();
        let offsets: Vec<u32> = layout.records.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![50, 125, 200]);
    }

    #[test]
    fn test_rejected_record_does_not_advance() {
        let matchers = motifs(&["A"]);
        let mut builder = LayoutBuilder::new(&matchers);
        builder.push_record("ok", "ACGT").unwrap();
        assert!(builder.push_record("bad", "").is_err());
        assert!(builder.push_record("bad2", "AC GT").is_err());
        let second = builder.push_record("ok2", "acgt").unwrap();
        assert_eq!(second.offset, 125);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_legend_colors_wrap() {
        let matchers = motifs(&["A", "C", "G", "T", "U", "N"]);
        let entries = legend(&matchers);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[5].color_index, 5);
        assert_eq!(entries[5].color, PALETTE[0]);
        assert_eq!(entries[4].color, PALETTE[4]);
    }

    #[test]
    fn test_layout_without_motifs() {
        let mut builder = LayoutBuilder::new(&[]);
        let record = builder.push_record("r1", "aaGATCaa").unwrap();
        assert!(record.motifs.is_empty());
        assert_eq!(record.exons, vec![Interval::new(2, 6)]);
        assert!(builder.finish().legend.is_empty());
    }
}
