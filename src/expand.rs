//! Propagate alignments from collapsed reads to every read sharing their sequence.
//!
//! Alignments are only computed against collapsed reads. The first FASTA pass ties each
//! resolved read name to its full sequence; the second pass hands that alignment to every
//! record (collapsed or not) whose sequence is identical.

use crate::error::{Error, Result};
use crate::fasta::FullSequenceRecord;
use crate::index::ResolvedFragment;
use crate::types::{HashMap, HashMapExt, Strand};
use indexmap::IndexMap;
use tracing::{info, warn};

/// A full read carrying the alignment inherited from its collapsed representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedEntry {
    pub identifier: String,
    pub full_sequence: String,
    pub fragment: String,
    pub strand: Strand,
    pub source_label: String,
}

/// Full sequences of resolved reads, plus the reverse lookup from sequence to read name.
#[derive(Debug, Default)]
pub struct SequenceIndex {
    by_identifier: HashMap<String, String>,
    sequence_to_identifier: HashMap<String, String>,
    /// Resolved reads never seen in the resolve pass.
    pub unmatched: usize,
}

impl SequenceIndex {
    /// First pass: record the full sequence of every FASTA entry that has an alignment.
    pub fn resolve<I>(records: I, resolved: &HashMap<String, ResolvedFragment>) -> Result<Self>
    where
        I: IntoIterator<Item = Result<FullSequenceRecord>>,
    {
        let mut by_identifier: HashMap<String, String> = HashMap::new();
        let mut sequence_to_identifier: HashMap<String, String> = HashMap::new();

        for record in records {
            let record = record?;
            if !resolved.contains_key(&record.identifier) {
                continue;
            }
            sequence_to_identifier.insert(record.full_sequence.clone(), record.identifier.clone());
            by_identifier.insert(record.identifier, record.full_sequence);
        }

        let unmatched = resolved.len().saturating_sub(by_identifier.len());
        if unmatched > 0 {
            warn!(unmatched, "aligned reads missing from the FASTA");
        }
        info!(
            matched = by_identifier.len(),
            distinct_sequences = sequence_to_identifier.len(),
            "resolved collapsed reads"
        );

        Ok(Self {
            by_identifier,
            sequence_to_identifier,
            unmatched,
        })
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Resolved read name whose full sequence is `sequence`, if any.
    pub fn identifier_for(&self, sequence: &str) -> Option<&str> {
        self.sequence_to_identifier.get(sequence).map(String::as_str)
    }
}

/// Second pass: one entry per FASTA record whose sequence matches a resolved read.
///
/// Entries keep the encounter order of `records`. A repeated identifier keeps its first
/// position and takes the later value.
pub fn expand<I>(
    records: I,
    resolved: &HashMap<String, ResolvedFragment>,
    index: &SequenceIndex,
) -> Result<IndexMap<String, ExpandedEntry>>
where
    I: IntoIterator<Item = Result<FullSequenceRecord>>,
{
    let mut entries: IndexMap<String, ExpandedEntry> = IndexMap::new();

    for record in records {
        let record = record?;
        let Some(source_id) = index.identifier_for(&record.full_sequence) else {
            continue;
        };

        let inconsistent = || Error::InconsistentSequence {
            identifier: source_id.to_string(),
            encountered_by: record.identifier.clone(),
        };
        let stored = index.by_identifier.get(source_id).ok_or_else(inconsistent)?;
        if *stored != record.full_sequence {
            return Err(inconsistent());
        }
        let fragment = resolved.get(source_id).ok_or_else(inconsistent)?;

        let entry = ExpandedEntry {
            identifier: record.identifier.clone(),
            full_sequence: record.full_sequence,
            fragment: fragment.fragment.clone(),
            strand: fragment.strand,
            source_label: fragment.source_label.clone(),
        };
        entries.insert(record.identifier, entry);
    }

    info!(reads = entries.len(), "expanded alignments to all reads");
    Ok(entries)
}
