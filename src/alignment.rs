use crate::error::{Error, Result};
use crate::types::Strand;
use tracing::warn;

/// Number of tab-separated columns in a bowtie (v1) default output line.
pub const ALIGNMENT_COLUMNS: usize = 8;

/// One `position:reference>read` entry from the bowtie mismatch column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchDescriptor {
    /// 0-based offset in the aligner's forward-read coordinates.
    pub position: usize,
    pub reference_base: u8,
    pub aligned_base: u8,
}

impl MismatchDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidMismatch {
            descriptor: descriptor.to_string(),
            reason: reason.to_string(),
        };

        let (pos, change) = descriptor
            .split_once(':')
            .ok_or_else(|| invalid("missing ':' separator"))?;
        let position = pos
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("position is not a non-negative integer"))?;
        let (reference, aligned) = change
            .split_once('>')
            .ok_or_else(|| invalid("missing '>' separator"))?;

        Ok(Self {
            position,
            reference_base: single_base(reference).ok_or_else(|| invalid("reference base must be one character"))?,
            aligned_base: single_base(aligned).ok_or_else(|| invalid("read base must be one character"))?,
        })
    }

    /// Index into the fragment string this descriptor overwrites.
    ///
    /// Reverse-strand descriptors count from the 3' end of the fragment as printed.
    pub fn fragment_index(&self, strand: Strand, len: usize) -> Option<usize> {
        if self.position >= len {
            return None;
        }
        match strand {
            Strand::Forward => Some(self.position),
            Strand::Reverse => Some(len - 1 - self.position),
        }
    }
}

fn single_base(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii_graphic() => Some(*b),
        _ => None,
    }
}

/// One line of bowtie output, with the miRNA as query and the read as reference.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    /// miRNA identifier.
    pub query_name: String,
    pub strand: Strand,
    /// Collapsed read name, still carrying its `#` suffix.
    pub reference_name: String,
    pub offset: u64,
    /// Read-derived fragment, already strand-corrected by the aligner.
    pub aligned_sequence: String,
    pub qualities: String,
    /// Column 7: alternative alignment ceiling (carried, never interpreted).
    pub alignment_ceiling: String,
    pub mismatches: Vec<MismatchDescriptor>,
}

impl AlignmentRecord {
    /// Parse one bowtie line. `line_no` is 1-based and only used for error reporting.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != ALIGNMENT_COLUMNS {
            return Err(Error::MalformedLine {
                line: line_no,
                reason: format!(
                    "expected {} tab-separated columns, found {}",
                    ALIGNMENT_COLUMNS,
                    fields.len()
                ),
            });
        }

        let strand: Strand = fields[1].parse()?;
        let offset = fields[3].parse::<u64>().map_err(|_| Error::MalformedLine {
            line: line_no,
            reason: format!("offset '{}' is not a non-negative integer", fields[3]),
        })?;
        if !fields[4].is_ascii() {
            return Err(Error::MalformedLine {
                line: line_no,
                reason: "aligned sequence contains non-ASCII characters".to_string(),
            });
        }

        let mismatches = if fields[7].is_empty() {
            Vec::new()
        } else {
            fields[7]
                .split(',')
                .map(MismatchDescriptor::parse)
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            query_name: fields[0].to_string(),
            strand,
            reference_name: fields[2].to_string(),
            offset,
            aligned_sequence: fields[4].to_string(),
            qualities: fields[5].to_string(),
            alignment_ceiling: fields[6].to_string(),
            mismatches,
        })
    }
}

/// The read-side sequence implied by an alignment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub reference_name: String,
    pub fragment: String,
    pub strand: Strand,
    pub source_label: String,
    pub mismatches: usize,
    /// Descriptors whose read base disagreed with the fragment.
    pub base_warnings: usize,
}

/// Rebuild the reference (read) fragment by undoing every mismatch the aligner reported.
///
/// A descriptor whose read base disagrees with the live fragment is logged and still applied.
pub fn reconstruct(record: AlignmentRecord) -> Result<Reconstruction> {
    let mut fragment = record.aligned_sequence.into_bytes();
    let len = fragment.len();
    let mut base_warnings = 0usize;

    for mismatch in &record.mismatches {
        let idx = mismatch
            .fragment_index(record.strand, len)
            .ok_or_else(|| Error::MismatchOutOfRange {
                descriptor: format!(
                    "{}:{}>{}",
                    mismatch.position,
                    mismatch.reference_base as char,
                    mismatch.aligned_base as char
                ),
                len,
            })?;

        if fragment[idx] != mismatch.aligned_base {
            base_warnings += 1;
            warn!(
                read = %record.reference_name,
                mirna = %record.query_name,
                strand = %record.strand,
                position = idx,
                expected = %(mismatch.aligned_base as char),
                found = %(fragment[idx] as char),
                "mismatch descriptor disagrees with aligned sequence"
            );
        }
        fragment[idx] = mismatch.reference_base;
    }

    let fragment = String::from_utf8(fragment).map_err(|_| Error::InvalidSequence {
        identifier: record.reference_name.clone(),
    })?;

    Ok(Reconstruction {
        reference_name: record.reference_name,
        fragment,
        strand: record.strand,
        source_label: record.query_name,
        mismatches: record.mismatches.len(),
        base_warnings,
    })
}
