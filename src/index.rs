use crate::alignment::{reconstruct, AlignmentRecord};
use crate::error::{Error, Result};
use crate::types::{HashMap, HashMapExt, Strand};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Delimiter appended by read collapsers (e.g. `fasta2collapse.pl`) before the copy count.
pub const DEFAULT_COLLAPSE_DELIMITER: char = '#';

/// What to do when a read name is aligned by more than one miRNA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// Keep the alignment seen last in the file.
    #[default]
    LastWins,
    /// Keep the alignment with the fewest mismatches; ties go to the later one.
    FewestMismatches,
    /// Abort on the second alignment of a read.
    Reject,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexOptions {
    pub collapse_delimiter: char,
    pub collision_policy: CollisionPolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            collapse_delimiter: DEFAULT_COLLAPSE_DELIMITER,
            collision_policy: CollisionPolicy::LastWins,
        }
    }
}

/// The surviving alignment for one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFragment {
    pub fragment: String,
    pub strand: Strand,
    pub source_label: String,
    pub mismatches: usize,
}

/// One fragment per read identifier, plus how many alignments hit each read.
#[derive(Debug, Default)]
pub struct AlignmentIndex {
    pub resolved: HashMap<String, ResolvedFragment>,
    pub counts: HashMap<String, usize>,
    pub records: usize,
    pub base_warnings: usize,
    options: IndexOptions,
}

/// Strip the collapser suffix, requiring exactly one delimiter in the name.
pub fn strip_collapse_suffix(name: &str, delimiter: char) -> Result<&str> {
    let count = name.matches(delimiter).count();
    if count != 1 {
        return Err(Error::CollapseDelimiter {
            name: name.to_string(),
            delimiter,
            count,
        });
    }
    Ok(name.split(delimiter).next().unwrap_or(name))
}

impl AlignmentIndex {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            resolved: HashMap::new(),
            counts: HashMap::new(),
            records: 0,
            base_warnings: 0,
            options,
        }
    }

    /// Build an index from raw bowtie lines. Only zero-length lines are skipped.
    pub fn build<I, S>(lines: I, options: IndexOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new(options);
        for (i, line) in lines.into_iter().enumerate() {
            index.push_line(line.as_ref(), i + 1)?;
        }
        Ok(index)
    }

    pub fn from_path(path: &Path, options: IndexOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(e, path))?;
        let mut index = Self::new(options);
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| Error::io(e, path))?;
            index.push_line(&line, i + 1)?;
        }
        info!(
            path = %path.display(),
            records = index.records,
            reads = index.resolved.len(),
            "indexed alignments"
        );
        Ok(index)
    }

    pub fn push_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        let record = AlignmentRecord::parse(line, line_no)?;
        let rec = reconstruct(record)?;
        self.records += 1;
        self.base_warnings += rec.base_warnings;

        let name = strip_collapse_suffix(&rec.reference_name, self.options.collapse_delimiter)?;
        let resolved = ResolvedFragment {
            fragment: rec.fragment,
            strand: rec.strand,
            source_label: rec.source_label,
            mismatches: rec.mismatches,
        };

        *self.counts.entry(name.to_string()).or_insert(0) += 1;
        self.upsert(name, resolved)
    }

    fn upsert(&mut self, name: &str, candidate: ResolvedFragment) -> Result<()> {
        let Some(existing) = self.resolved.get_mut(name) else {
            self.resolved.insert(name.to_string(), candidate);
            return Ok(());
        };

        debug!(read = name, previous = %existing.source_label, next = %candidate.source_label, "read aligned more than once");
        match self.options.collision_policy {
            CollisionPolicy::LastWins => *existing = candidate,
            CollisionPolicy::FewestMismatches => {
                if candidate.mismatches <= existing.mismatches {
                    *existing = candidate;
                }
            }
            CollisionPolicy::Reject => {
                return Err(Error::DuplicateAlignment {
                    identifier: name.to_string(),
                })
            }
        }
        Ok(())
    }
}
