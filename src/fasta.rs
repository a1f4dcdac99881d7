use crate::error::{Error, Result};
use needletail::{parse_fastx_reader, FastxReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PROGRESS_INTERVAL: u64 = 100_000;

/// A read as it appears in the (collapsed or uncollapsed) FASTA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSequenceRecord {
    pub identifier: String,
    pub full_sequence: String,
}

impl FullSequenceRecord {
    pub fn new(identifier: impl Into<String>, full_sequence: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            full_sequence: full_sequence.into(),
        }
    }
}

/// Streams FASTA records one at a time. Plain or gzip input; multi-line records are joined.
/// An empty source yields no records.
pub struct FastaReader {
    reader: Option<Box<dyn FastxReader>>,
    path: PathBuf,
    records_read: u64,
}

impl FastaReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(e, path))?;
        Self::with_label(file, path.to_path_buf())
    }

    /// Read FASTA from any byte source; `label` stands in for a path in messages.
    pub fn from_reader<R: Read + Send + 'static>(source: R, label: &str) -> Result<Self> {
        Self::with_label(source, PathBuf::from(label))
    }

    fn with_label<R: Read + Send + 'static>(source: R, path: PathBuf) -> Result<Self> {
        let mut source = BufReader::new(source);
        let is_empty = source
            .fill_buf()
            .map_err(|e| Error::io(e, &path))?
            .is_empty();
        if is_empty {
            debug!(path = %path.display(), "empty FASTA");
            return Ok(Self {
                reader: None,
                path,
                records_read: 0,
            });
        }

        let reader = parse_fastx_reader(source).map_err(|e| Error::Fasta {
            path: path.clone(),
            message: format!("failed to open FASTA: {}", e),
        })?;
        Ok(Self {
            reader: Some(reader),
            path,
            records_read: 0,
        })
    }

    fn next_record(&mut self) -> Option<Result<FullSequenceRecord>> {
        let record = match self.reader.as_mut()?.next()? {
            Ok(record) => record,
            Err(e) => {
                return Some(Err(Error::Fasta {
                    path: self.path.clone(),
                    message: format!("failed to parse FASTA record: {}", e),
                }))
            }
        };

        // Header text after the first whitespace is a description, not part of the id.
        let identifier = String::from_utf8_lossy(record.id())
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();
        let full_sequence = match String::from_utf8(record.seq().into_owned()) {
            Ok(seq) => seq,
            Err(_) => return Some(Err(Error::InvalidSequence { identifier })),
        };

        if self.records_read % PROGRESS_INTERVAL == 0 && self.records_read > 0 {
            info!(path = %self.path.display(), records = self.records_read, "reading FASTA");
        }
        self.records_read += 1;

        Some(Ok(FullSequenceRecord {
            identifier,
            full_sequence,
        }))
    }
}

impl Iterator for FastaReader {
    type Item = Result<FullSequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
