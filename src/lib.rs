//! # motif-mark
//!
//! A library for annotating nucleotide reads with structural features and for
//! adjusting alignment start positions from SAM alignment fields.
//!
//! Genes are supplied as FASTA records whose letter case encodes structure:
//! uppercase bases are exons, lowercase bases are introns. Motifs are supplied
//! as IUPAC ambiguity strings (`YGCY`, `GCAUG`, ...), and every occurrence of
//! each motif is reported, overlapping occurrences included.
//!
//! `motif-mark` produces plain half-open intervals that a renderer can draw
//! directly; it does not draw anything itself.
//!
//! ## Features
//!
//! - **Ambiguity expansion**: Single-pass table lookup per motif position
//! - **Overlap-correct scanning**: `AA` in `AAAA` yields three hits
//! - **Exon detection**: Every maximal uppercase run, not just the first or last
//! - **CIGAR adjustment**: Soft-clip and strand aware start positions
//! - **Quality scoring**: Phred+33 decoding and averaging
//!
//! ## Example
//!
//! ```rust
//! use motif_mark::core::cigar::adjust_position;
//! use motif_mark::core::features::locate_exons;
//! use motif_mark::core::motif::expand;
//! use motif_mark::core::scanner::find_all;
//! use motif_mark::{Interval, Strand};
//!
//! let matcher = expand("YGCY").unwrap();
//! let hits: Vec<Interval> = find_all(&matcher, "ttgcatGCTTcgct").collect();
//! assert_eq!(hits.len(), 2);
//!
//! assert_eq!(locate_exons("aaGATCaa").unwrap(), vec![Interval::new(2, 6)]);
//! assert_eq!(adjust_position(100, "10S90M", Strand::Forward).unwrap(), 90);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Pure annotation algorithms and their data types
//! - [`layout`]: Per-record layout accumulation for renderers
//! - [`parsing`]: Readers for FASTA, motif lists and SAM alignment lines
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod layout;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::error::AnnotateError;
pub use crate::core::motif::{expand, Matcher};
pub use crate::core::sequence::{gc_content, reverse_complement, validate_base_seq};
pub use crate::core::types::*;
pub use crate::layout::{Layout, LayoutBuilder, RecordLayout};
