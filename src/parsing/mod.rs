//! Readers that feed the core with records.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: one record per sequence, wrapped lines joined, case kept
//! - **Motif files**: one ambiguity motif per line, expanded on read
//! - **SAM files**: the FLAG, POS, CIGAR and QUAL columns of alignment lines
//!
//! ## Example
//!
//! ```rust,no_run
//! use motif_mark::parsing::fasta::read_fasta_file;
//! use motif_mark::parsing::motifs::parse_motif_file;
//! use std::path::Path;
//!
//! let records = read_fasta_file(Path::new("genes.fa")).unwrap();
//! let motifs = parse_motif_file(Path::new("motifs.txt")).unwrap();
//! ```
//!
//! ## SAM columns
//!
//! | Column | Field | Use |
//! |--------|-------|-----|
//! | 1      | QNAME | Record label |
//! | 2      | FLAG  | Strand (bit 0x10) |
//! | 4      | POS   | Start position |
//! | 6      | CIGAR | Soft clip and reference span |
//! | 11     | QUAL  | Mean quality |

pub mod fasta;
pub mod motifs;
pub mod sam;
