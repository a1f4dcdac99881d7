// Shared fixture for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const S1: &str = "ACGTTGACCTAGCATGAGGTAGTAGGTTGTATAGTTGCATGCAAGTCCAGTAAGGC";
pub const S2: &str = "GGATCCATTTAAATGCGCGCATCTATACAACCTACTACCTCATTCGA";
pub const S3: &str = "ACACACACACACACACACACACAC";

/// `S1` downstream of let-7 (20 nt, `+` strand).
pub const S1_DOWNSTREAM: &str = "GCATGCAAGTCCAGTAAGGC";
/// `S1` upstream of let-7 (14 nt).
pub const S1_UPSTREAM: &str = "ACGTTGACCTAGCA";
/// `S2` downstream of the reverse-strand hit (22 nt).
pub const S2_DOWNSTREAM: &str = "GGATCCATTTAAATGCGCGCAT";
/// `S2` upstream of the reverse-strand hit (5 nt).
pub const S2_UPSTREAM: &str = "TTCGA";

/// c1 is hit twice (miR-a wins), c2 once on the reverse strand, c9 is absent from the FASTA.
pub const ALIGNMENTS: &str = "\
miR-x\t+\tc1#2\t36\tGCATGCAAGT\tIIIIIIIIII\t0\t
miR-a\t+\tc1#2\t14\tTGACGTAGTAGGTTGTATAGTT\tIIIIIIIIIIIIIIIIIIIIII\t0\t3:G>C
miR-b\t-\tc2#1\t22\tCTATACAACCTACTACCTGA\tIIIIIIIIIIIIIIIIIIII\t0\t1:C>G
miR-z\t+\tc9#1\t0\tAAAAAAAAAA\tIIIIIIIIII\t0\t
";

pub struct Fixture {
    pub dir: TempDir,
    pub alignments: PathBuf,
    pub collapsed: PathBuf,
    pub all_reads: PathBuf,
    pub out_fasta: PathBuf,
    pub out_metrics: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_alignments(ALIGNMENTS)
    }

    pub fn with_alignments(alignments: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = |name: &str| dir.path().join(name);

        write(&path("mirs.bowtie"), alignments);
        write(
            &path("collapsed.fa"),
            &format!(">c1\n{}\n{}\n>c2\n{S2}\n>c3\n{S3}\n", &S1[..30], &S1[30..]),
        );
        write(
            &path("all.fa"),
            &format!(">u1\n{S1}\n>u3 second copy\n{S2}\n>u2\n{S1}\n>u4\n{S3}\n"),
        );

        Self {
            alignments: path("mirs.bowtie"),
            collapsed: path("collapsed.fa"),
            all_reads: path("all.fa"),
            out_fasta: path("candidates.fa"),
            out_metrics: path("metrics.tsv"),
            dir,
        }
    }
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

/// Parse `>header\nseq\n` pairs from a candidate FASTA.
pub fn read_candidates(path: &Path) -> Vec<(String, String)> {
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(2)
        .map(|pair| (pair[0].trim_start_matches('>').to_string(), pair[1].to_string()))
        .collect()
}
