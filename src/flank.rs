use crate::error::{Error, Result};
use crate::expand::ExpandedEntry;
use crate::types::{FlankKind, Strand};
use indexmap::{IndexMap, IndexSet};
use tracing::info;

/// Shortest flank still reported as a candidate, unless configured otherwise.
pub const DEFAULT_MIN_FLANK_LEN: usize = 18;

/// One flank emitted as a FASTA candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateRecord {
    pub identifier: String,
    pub strand: Strand,
    pub flank_kind: FlankKind,
    pub sequence: String,
}

impl CandidateRecord {
    /// FASTA header without the leading `>`: `{identifier}_{strand}_{flank}`.
    pub fn header(&self) -> String {
        format!("{}_{}_{}", self.identifier, self.strand, self.flank_kind)
    }
}

/// Flank assignment for one read. `upstream + fragment + downstream` rebuilds a `+` read,
/// `downstream + fragment + upstream` a `-` read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flanks<'a> {
    pub upstream: &'a str,
    pub downstream: &'a str,
}

/// Per-read outcome of flank extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlankMetrics {
    pub identifier: String,
    pub upstream_pass: bool,
    pub downstream_pass: bool,
    pub upstream: String,
    pub fragment: String,
    pub source_label: String,
    pub downstream: String,
    pub full_sequence: String,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub candidates: IndexSet<CandidateRecord>,
    pub metrics: Vec<FlankMetrics>,
}

/// Split a read around the first occurrence of its fragment.
pub fn split_flanks(entry: &ExpandedEntry) -> Result<Flanks<'_>> {
    let start = entry
        .full_sequence
        .find(&entry.fragment)
        .ok_or_else(|| Error::FragmentNotFound {
            identifier: entry.identifier.clone(),
            fragment: entry.fragment.clone(),
            full_sequence: entry.full_sequence.clone(),
        })?;
    let lo = &entry.full_sequence[..start];
    let hi = &entry.full_sequence[start + entry.fragment.len()..];

    Ok(match entry.strand {
        Strand::Reverse => Flanks {
            upstream: hi,
            downstream: lo,
        },
        Strand::Forward => Flanks {
            upstream: lo,
            downstream: hi,
        },
    })
}

/// Cut every expanded read into flanks and keep those at least `min_length` long.
///
/// Short flanks still show up in the metrics with a failing flag. Headers come from each
/// entry's own identifier, so two entries naming the same read are rejected.
pub fn extract(entries: &IndexMap<String, ExpandedEntry>, min_length: usize) -> Result<Extraction> {
    let mut out = Extraction::default();

    for entry in entries.values() {
        let identifier = &entry.identifier;
        let flanks = split_flanks(entry)?;
        let downstream_pass = flanks.downstream.len() >= min_length;
        let upstream_pass = flanks.upstream.len() >= min_length;

        for (kind, seq, pass) in [
            (FlankKind::Downstream, flanks.downstream, downstream_pass),
            (FlankKind::Upstream, flanks.upstream, upstream_pass),
        ] {
            if !pass {
                continue;
            }
            let candidate = CandidateRecord {
                identifier: identifier.clone(),
                strand: entry.strand,
                flank_kind: kind,
                sequence: seq.to_string(),
            };
            let header = candidate.header();
            if !out.candidates.insert(candidate) {
                return Err(Error::DuplicateCandidate { header });
            }
        }

        out.metrics.push(FlankMetrics {
            identifier: identifier.clone(),
            upstream_pass,
            downstream_pass,
            upstream: flanks.upstream.to_string(),
            fragment: entry.fragment.clone(),
            source_label: entry.source_label.clone(),
            downstream: flanks.downstream.to_string(),
            full_sequence: entry.full_sequence.clone(),
        });
    }

    info!(
        reads = out.metrics.len(),
        candidates = out.candidates.len(),
        min_length,
        "extracted flanks"
    );
    Ok(out)
}
