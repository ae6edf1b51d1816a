//! Command-line interface for motif-mark.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Lay out gene, exon, intron and motif spans for FASTA records
//! - **adjust**: Compute strand-aware adjusted start positions for SAM alignments
//! - **quality**: Report the mean base quality of SAM alignments
//!
//! ## Usage
//!
//! ```text
//! # Annotate genes with a motif list
//! motif-mark annotate genes.fa -m motifs.txt
//!
//! # JSON layout for a renderer
//! motif-mark annotate genes.fa -m motifs.txt --format json
//!
//! # Adjusted positions, skipping unmapped reads
//! samtools view -h sample.bam | motif-mark adjust - --skip-invalid
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::parsing::sam::{parse_alignment_file, read_sam, ParsedRecord};

pub mod adjust;
pub mod annotate;
pub mod quality;

#[derive(Parser)]
#[command(name = "motif-mark")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate reads with exon and motif spans and adjust alignment positions")]
#[command(
    long_about = "motif-mark locates exons (uppercase runs) and every, possibly overlapping, occurrence of IUPAC ambiguity motifs in FASTA records, producing a layout ready for rendering.\n\nIt also adjusts SAM alignment start positions for soft clipping and strand, and reports mean base qualities."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out exon and motif spans for each FASTA record
    Annotate(annotate::AnnotateArgs),

    /// Adjust SAM alignment start positions for soft clipping and strand
    Adjust(adjust::AdjustArgs),

    /// Report mean base quality of SAM alignments
    Quality(quality::QualityArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Read alignment records from a SAM/BAM file, or SAM from stdin when the path is `-`
pub(crate) fn read_alignment_input(input: &Path) -> anyhow::Result<Vec<ParsedRecord>> {
    if input.to_string_lossy() == "-" {
        return Ok(read_sam(std::io::stdin().lock())?);
    }

    Ok(parse_alignment_file(input)?)
}
