use crate::expand::{expand, SequenceIndex};
use crate::fasta::FastaReader;
use crate::flank::{extract, DEFAULT_MIN_FLANK_LEN};
use crate::index::{AlignmentIndex, IndexOptions};
use crate::output::{merge_metrics, write_candidates, write_file, write_metrics};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bowtie output, miRNAs aligned against collapsed reads.
    pub alignments: PathBuf,
    /// FASTA holding the collapsed reads the alignments refer to.
    pub resolve_fasta: PathBuf,
    /// FASTA whose reads inherit alignments by exact sequence; usually `resolve_fasta`.
    pub expand_fasta: PathBuf,
    pub out_fasta: PathBuf,
    pub out_metrics: PathBuf,
    pub min_flank_len: usize,
    pub index: IndexOptions,
}

impl PipelineConfig {
    pub fn new(
        alignments: impl Into<PathBuf>,
        fasta: impl Into<PathBuf>,
        out_fasta: impl Into<PathBuf>,
        out_metrics: impl Into<PathBuf>,
    ) -> Self {
        let fasta = fasta.into();
        Self {
            alignments: alignments.into(),
            resolve_fasta: fasta.clone(),
            expand_fasta: fasta,
            out_fasta: out_fasta.into(),
            out_metrics: out_metrics.into(),
            min_flank_len: DEFAULT_MIN_FLANK_LEN,
            index: IndexOptions::default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub alignment_records: usize,
    pub resolved_reads: usize,
    pub base_warnings: usize,
    pub collapsed_matched: usize,
    pub unmatched_resolved: usize,
    pub expanded_reads: usize,
    pub candidates: usize,
    pub upstream_pass: usize,
    pub downstream_pass: usize,
    pub metrics_rows: usize,
}

/// Run every stage in memory, then write both outputs.
///
/// Any fatal input error returns before either output file is created.
pub fn run(config: &PipelineConfig) -> Result<Stats> {
    let index = AlignmentIndex::from_path(&config.alignments, config.index)
        .with_context(|| format!("failed to index alignments from {}", config.alignments.display()))?;

    let sequences = FastaReader::open(&config.resolve_fasta)
        .and_then(|reader| SequenceIndex::resolve(reader, &index.resolved))
        .with_context(|| format!("failed to resolve reads from {}", config.resolve_fasta.display()))?;

    let entries = FastaReader::open(&config.expand_fasta)
        .and_then(|reader| expand(reader, &index.resolved, &sequences))
        .with_context(|| format!("failed to expand reads from {}", config.expand_fasta.display()))?;

    let extraction = extract(&entries, config.min_flank_len).context("failed to extract flanks")?;

    let mut stats = Stats {
        alignment_records: index.records,
        resolved_reads: index.resolved.len(),
        base_warnings: index.base_warnings,
        collapsed_matched: sequences.len(),
        unmatched_resolved: sequences.unmatched,
        expanded_reads: entries.len(),
        candidates: extraction.candidates.len(),
        ..Stats::default()
    };
    for m in &extraction.metrics {
        stats.upstream_pass += usize::from(m.upstream_pass);
        stats.downstream_pass += usize::from(m.downstream_pass);
    }

    let rows = merge_metrics(&index.counts, extraction.metrics);
    stats.metrics_rows = rows.len();

    write_file(&config.out_fasta, |w| write_candidates(w, &extraction.candidates))
        .context("failed to write candidate FASTA")?;
    write_file(&config.out_metrics, |w| write_metrics(w, &rows)).context("failed to write metrics")?;

    info!(
        out_fasta = %config.out_fasta.display(),
        out_metrics = %config.out_metrics.display(),
        "wrote outputs"
    );
    Ok(stats)
}
