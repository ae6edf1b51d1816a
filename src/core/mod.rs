//! Core annotation algorithms.
//!
//! Every function in this module is pure: no I/O, no logging, no shared state.
//! Failures are reported through [`AnnotateError`] and never retried.
//!
//! - [`motif`]: expands IUPAC ambiguity motifs into per-position base classes
//! - [`scanner`]: finds every occurrence of a motif, overlaps included
//! - [`features`]: classifies bases as exon/intron by letter case and builds spans
//! - [`cigar`]: adjusts alignment start positions from CIGAR and strand
//! - [`quality`]: Phred+33 quality decoding and averaging
//! - [`sequence`]: small nucleotide helpers (validation, GC content, reverse complement)
//!
//! ## Ambiguity codes
//!
//! | Code | Bases      | Code | Bases      |
//! |------|------------|------|------------|
//! | W    | A, T, U    | B    | C, G, T    |
//! | S    | C, G       | D    | A, G, T, U |
//! | M    | A, C       | H    | A, C, T, U |
//! | K    | G, T, U    | V    | A, C, G    |
//! | R    | A, G       | N    | any base   |
//! | Y    | C, T, U    | Z    | gap (`-`)  |
//!
//! `U` matches both `U` and `T`, so RNA motifs can be searched in DNA reads.

pub mod cigar;
pub mod error;
pub mod features;
pub mod motif;
pub mod quality;
pub mod scanner;
pub mod sequence;
pub mod types;

pub use error::AnnotateError;
