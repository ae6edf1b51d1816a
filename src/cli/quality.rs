use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{read_alignment_input, OutputFormat};

#[derive(Args)]
pub struct QualityArgs {
    /// SAM (plain or gzipped) or BAM file; use '-' for SAM on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Only report records whose mean quality is at least this value
    #[arg(long)]
    pub min_mean: Option<f64>,

    /// Skip malformed records with a warning instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Mean base quality of one alignment record
#[derive(Debug, Clone, Serialize)]
pub struct QualityRecord {
    pub name: String,
    pub mean_quality: f64,
}

/// Execute quality subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, or if a record is malformed
/// and `--skip-invalid` was not given.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: QualityArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = read_alignment_input(&args.input)?;

    let mut scored = Vec::new();
    let mut without_quality = 0usize;
    for (number, parsed) in records {
        let record = match parsed {
            Ok(record) => record,
            Err(e) if args.skip_invalid => {
                warn!(record = number, error = %e, "Skipping alignment record");
                continue;
            }
            Err(e) => anyhow::bail!("Record {number}: {e}"),
        };

        let mean_quality = match record.mean_quality() {
            Some(Ok(mean)) => mean,
            Some(Err(e)) if args.skip_invalid => {
                warn!(record = number, error = %e, "Skipping alignment record");
                continue;
            }
            Some(Err(e)) => anyhow::bail!("Record {number}: {e}"),
            None => {
                debug!(record = %record.name, "No base qualities");
                without_quality += 1;
                continue;
            }
        };

        if args.min_mean.is_some_and(|min| mean_quality < min) {
            continue;
        }

        scored.push(QualityRecord {
            name: record.name,
            mean_quality,
        });
    }

    if verbose {
        eprintln!(
            "Scored {} records ({without_quality} without base qualities)",
            scored.len()
        );
    }

    match format {
        OutputFormat::Text | OutputFormat::Tsv => {
            if matches!(format, OutputFormat::Tsv) {
                println!("name\tmean_quality");
            }
            for r in &scored {
                println!("{}\t{:.2}", r.name, r.mean_quality);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scored)?),
    }

    Ok(())
}
