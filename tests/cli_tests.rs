//! End-to-end tests of the motif-mark command line.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const FASTA: &[u8] = b">gene1 test gene\nttgcatGCATG\ncctgc\n>gene2\naaGATCaa\n";
const MOTIFS: &[u8] = b"ygcy\nGCAUG\n";
const SAM: &[u8] = b"@HD\tVN:1.6\n\
read1\t0\tchr1\t100\t60\t10S90M\t*\t0\t0\tACGT\tIIII\n\
read2\t16\tchr1\t100\t60\t90M10S\t*\t0\t0\tACGT\t@@@@\n";

fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    temp.write_all(content).expect("Failed to write temp file");
    temp.flush().expect("Failed to flush temp file");
    temp
}

fn motif_mark() -> Command {
    Command::cargo_bin("motif-mark").expect("binary should be built")
}

#[test]
fn test_annotate_text_output() {
    let fasta = temp_file(".fa", FASTA);
    let motifs = temp_file(".txt", MOTIFS);

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(">gene1"))
        .stdout(predicate::str::contains("Exons: [6, 11)"))
        .stdout(predicate::str::contains("GCAUG (color 1): [2, 7) [6, 11)"))
        .stdout(predicate::str::contains(">gene2"))
        .stdout(predicate::str::contains("Legend:"));
}

#[test]
fn test_annotate_json_output() {
    let fasta = temp_file(".fa", FASTA);
    let motifs = temp_file(".txt", MOTIFS);

    let output = motif_mark()
        .args(["--format", "json", "annotate"])
        .arg(fasta.path())
        .arg("--motifs")
        .arg(motifs.path())
        .output()
        .expect("command should run");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let records = json["records"].as_array().expect("records array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["header"], "gene1");
    assert_eq!(records[0]["offset"], 50);
    assert_eq!(records[1]["offset"], 125);
    assert_eq!(records[1]["exons"][0]["start"], 2);
    assert_eq!(records[1]["exons"][0]["end"], 6);
    assert_eq!(json["legend"][0]["motif"], "ygcy");
}

#[test]
fn test_annotate_tsv_output() {
    let fasta = temp_file(".fa", FASTA);
    let motifs = temp_file(".txt", MOTIFS);

    motif_mark()
        .args(["-f", "tsv", "annotate"])
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "record\tfeature\tstart\tend\tlabel\tcolor_index",
        ))
        .stdout(predicate::str::contains("gene2\texon\t2\t6\t.\t."))
        .stdout(predicate::str::contains("gene1\tmotif\t9\t13\tygcy\t0"));
}

#[test]
fn test_annotate_invalid_motif_fails() {
    let fasta = temp_file(".fa", FASTA);
    let motifs = temp_file(".txt", b"ygcy\nGCXUG\n");

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_annotate_malformed_record_aborts_or_skips() {
    let fasta = temp_file(".fa", b">good\nacGTac\n>bad\nac12ac\n");
    let motifs = temp_file(".txt", MOTIFS);

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 'bad'"));

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .arg("--skip-invalid")
        .assert()
        .success()
        .stdout(predicate::str::contains(">good"))
        .stdout(predicate::str::contains(">bad").not());
}

#[test]
fn test_annotate_accepts_iupac_bases_unless_strict() {
    let fasta = temp_file(".fa", b">iupac\nacRYgtAC\n");
    let motifs = temp_file(".txt", MOTIFS);

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(">iupac"))
        .stdout(predicate::str::contains("Exons: [2, 4) [6, 8)"));

    motif_mark()
        .arg("annotate")
        .arg(fasta.path())
        .arg("-m")
        .arg(motifs.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 'iupac'"));
}

#[test]
fn test_adjust_tsv_output() {
    let sam = temp_file(".sam", SAM);

    motif_mark()
        .args(["--format", "tsv", "adjust"])
        .arg(sam.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("read1\t0\t+\t100\t10S90M\t90"))
        .stdout(predicate::str::contains("read2\t16\t-\t100\t90M10S\t200"));
}

#[test]
fn test_adjust_from_stdin() {
    motif_mark()
        .args(["adjust", "-"])
        .write_stdin(SAM)
        .assert()
        .success()
        .stdout(predicate::str::contains("read1\t+\t100 -> 90"));
}

#[test]
fn test_adjust_unmapped_record() {
    let sam = temp_file(
        ".sam",
        b"read1\t0\tchr1\t100\t60\t90M\t*\t0\t0\tACGT\tIIII\nread2\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\t*\n",
    );

    motif_mark()
        .arg("adjust")
        .arg(sam.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 2"));

    motif_mark()
        .arg("adjust")
        .arg(sam.path())
        .arg("--skip-invalid")
        .assert()
        .success()
        .stdout(predicate::str::contains("read1"))
        .stdout(predicate::str::contains("read2").not());
}

#[test]
fn test_adjust_rejects_out_of_range_position() {
    let sam = temp_file(
        ".sam",
        b"read1\t16\tchr1\t9223372036854775800\t60\t90M10S\t*\t0\t0\tACGT\tIIII\n",
    );

    motif_mark()
        .arg("adjust")
        .arg(sam.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 1"));
}

#[test]
fn test_quality_output() {
    let sam = temp_file(".sam", SAM);

    motif_mark()
        .arg("quality")
        .arg(sam.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("read1\t40.00"))
        .stdout(predicate::str::contains("read2\t31.00"));

    motif_mark()
        .arg("quality")
        .arg(sam.path())
        .args(["--min-mean", "35"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read1"))
        .stdout(predicate::str::contains("read2").not());
}
