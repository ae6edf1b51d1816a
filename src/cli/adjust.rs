use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::cli::{read_alignment_input, OutputFormat};
use crate::core::types::Strand;

#[derive(Args)]
pub struct AdjustArgs {
    /// SAM (plain or gzipped) or BAM file; use '-' for SAM on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Skip malformed or unmapped records with a warning instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Adjusted start of one alignment record
#[derive(Debug, Clone, Serialize)]
pub struct AdjustedRecord {
    pub name: String,
    pub flag: u16,
    pub strand: Strand,
    pub position: i64,
    pub cigar: String,
    pub adjusted_position: i64,
}

/// Execute adjust subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, or if a record is malformed
/// and `--skip-invalid` was not given.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AdjustArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = read_alignment_input(&args.input)?;

    let mut adjusted = Vec::with_capacity(records.len());
    for (number, parsed) in records {
        let result = parsed.map_err(anyhow::Error::from).and_then(|record| {
            let adjusted_position = record.adjusted_position()?;
            Ok(AdjustedRecord {
                strand: record.strand(),
                name: record.name,
                flag: record.flag,
                // Always present once adjustment has succeeded
                position: record.position.unwrap_or_default(),
                cigar: record.cigar,
                adjusted_position,
            })
        });

        match result {
            Ok(record) => adjusted.push(record),
            Err(e) if args.skip_invalid => {
                warn!(record = number, error = %e, "Skipping alignment record");
            }
            Err(e) => anyhow::bail!("Record {number}: {e}"),
        }
    }

    if verbose {
        eprintln!("Adjusted {} alignment records", adjusted.len());
    }

    match format {
        OutputFormat::Text => {
            for r in &adjusted {
                println!(
                    "{}\t{}\t{} -> {} ({})",
                    r.name, r.strand, r.position, r.adjusted_position, r.cigar
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&adjusted)?),
        OutputFormat::Tsv => {
            println!("name\tflag\tstrand\tposition\tcigar\tadjusted_position");
            for r in &adjusted {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    r.name, r.flag, r.strand, r.position, r.cigar, r.adjusted_position
                );
            }
        }
    }

    Ok(())
}
