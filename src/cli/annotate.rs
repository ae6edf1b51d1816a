use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::core::error::AnnotateError;
use crate::core::sequence::validate_base_seq;
use crate::layout::{Layout, LayoutBuilder, RecordLayout};
use crate::parsing;

#[derive(Args)]
pub struct AnnotateArgs {
    /// FASTA file of reads/genes (exons uppercase, introns lowercase)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Motif file, one IUPAC ambiguity motif per line
    #[arg(short, long, required = true)]
    pub motifs: PathBuf,

    /// Reject records with bases outside A, T, G, C, N (or A, U, G, C, N with --rna)
    #[arg(long)]
    pub strict: bool,

    /// Use the RNA alphabet for --strict
    #[arg(long, requires = "strict")]
    pub rna: bool,

    /// Skip malformed records with a warning instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be parsed, or if a record is malformed
/// and `--skip-invalid` was not given.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let matchers = parsing::motifs::parse_motif_file(&args.motifs)?;
    info!(motifs = matchers.len(), "Loaded motifs");

    if !parsing::fasta::is_fasta_file(&args.input) {
        warn!(
            path = %args.input.display(),
            "Input does not have a FASTA extension, reading it as FASTA anyway"
        );
    }
    let records = parsing::fasta::read_fasta_file(&args.input)?;

    if verbose {
        eprintln!(
            "Read {} records and {} motifs",
            records.len(),
            matchers.len()
        );
    }

    let mut builder = LayoutBuilder::new(&matchers);
    let mut skipped = 0usize;

    for record in &records {
        let checked = if args.strict {
            check_alphabet(&record.sequence, args.rna)
        } else {
            Ok(())
        };
        let result = checked.and_then(|()| {
            builder
                .push_record(record.name.clone(), &record.sequence)
                .map(|_| ())
        });

        match result {
            Ok(()) => debug!(record = %record.name, "Laid out record"),
            Err(e) if args.skip_invalid => {
                warn!(record = %record.name, error = %e, "Skipping record");
                skipped += 1;
            }
            Err(e) => anyhow::bail!("Record '{}': {e}", record.name),
        }
    }

    if skipped > 0 {
        warn!(skipped, "Some records were skipped");
    }

    let layout = builder.finish();
    match format {
        OutputFormat::Text => print_text_layout(&layout),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
        OutputFormat::Tsv => print_tsv_layout(&layout),
    }

    Ok(())
}

/// Alphabet check for `--strict`; empty and non-alphabetic records are left to the layout
fn check_alphabet(sequence: &str, rna: bool) -> Result<(), AnnotateError> {
    if validate_base_seq(sequence, rna) {
        return Ok(());
    }
    let alphabet = if rna { "A, U, G, C, N" } else { "A, T, G, C, N" };
    Err(AnnotateError::MalformedSequence(format!(
        "sequence contains characters outside {alphabet}"
    )))
}

fn print_text_layout(layout: &Layout) {
    for record in &layout.records {
        println!(">{}", record.header);
        println!(
            "  Length: {} (GC {:.1}%)",
            record.gene.len(),
            record.gc_content * 100.0
        );
        println!("  Track offset: {}", record.offset);
        println!("  Gene: {}", record.gene);
        println!("  Exons: {}", join_spans(&record.exons));
        println!("  Introns: {}", join_spans(&record.introns));
        println!("  Motif hits: {}", record.motif_hit_count());
        for track in &record.motifs {
            println!(
                "    {} (color {}): {}",
                track.motif,
                track.color_index,
                join_spans(&track.spans)
            );
        }
    }

    if !layout.legend.is_empty() {
        println!("\nLegend:");
        for entry in &layout.legend {
            let [r, g, b] = entry.color;
            println!(
                "  {} {} rgb({r:.2}, {g:.2}, {b:.2})",
                entry.color_index, entry.motif
            );
        }
    }
}

fn join_spans(spans: &[crate::core::types::Interval]) -> String {
    if spans.is_empty() {
        return "-".to_string();
    }
    spans
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_tsv_layout(layout: &Layout) {
    println!("record\tfeature\tstart\tend\tlabel\tcolor_index");
    for record in &layout.records {
        print_tsv_record(record);
    }
}

fn print_tsv_record(record: &RecordLayout) {
    println!(
        "{}\tgene\t{}\t{}\t.\t.",
        record.header, record.gene.start, record.gene.end
    );
    for exon in &record.exons {
        println!("{}\texon\t{}\t{}\t.\t.", record.header, exon.start, exon.end);
    }
    for intron in &record.introns {
        println!(
            "{}\tintron\t{}\t{}\t.\t.",
            record.header, intron.start, intron.end
        );
    }
    for track in &record.motifs {
        for span in &track.spans {
            println!(
                "{}\tmotif\t{}\t{}\t{}\t{}",
                record.header, span.start, span.end, track.motif, track.color_index
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_alphabet() {
        assert!(check_alphabet("acgtNACGT", false).is_ok());
        assert!(check_alphabet("acguNACGU", true).is_ok());
        assert!(check_alphabet("", false).is_ok());
        assert!(matches!(
            check_alphabet("ACGU", false),
            Err(AnnotateError::MalformedSequence(_))
        ));
        assert!(matches!(
            check_alphabet("acRYgtAC", false),
            Err(AnnotateError::MalformedSequence(_))
        ));
    }

    #[test]
    fn test_join_spans() {
        use crate::core::types::Interval;

        assert_eq!(join_spans(&[]), "-");
        assert_eq!(
            join_spans(&[Interval::new(0, 2), Interval::new(5, 9)]),
            "[0, 2) [5, 9)"
        );
    }
}
