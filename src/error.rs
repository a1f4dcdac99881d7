use std::path::PathBuf;

/// Fatal conditions raised while building candidates.
///
/// Every variant aborts the run; nothing is written once one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("FASTA parsing error in {path}: {message}")]
    Fasta { path: PathBuf, message: String },

    #[error("malformed alignment line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("unrecognized strand '{value}' (expected '+' or '-')")]
    InvalidStrand { value: String },

    #[error("invalid mismatch descriptor '{descriptor}': {reason}")]
    InvalidMismatch { descriptor: String, reason: String },

    #[error("mismatch descriptor '{descriptor}' maps outside a fragment of length {len}")]
    MismatchOutOfRange { descriptor: String, len: usize },

    #[error("read name '{name}' must contain exactly one '{delimiter}', found {count}")]
    CollapseDelimiter {
        name: String,
        delimiter: char,
        count: usize,
    },

    #[error("read '{identifier}' has more than one alignment and the collision policy rejects duplicates")]
    DuplicateAlignment { identifier: String },

    #[error("sequence stored for '{identifier}' does not match the sequence encountered for '{encountered_by}'")]
    InconsistentSequence {
        identifier: String,
        encountered_by: String,
    },

    #[error("cannot find fragment {fragment} within read '{identifier}' ({full_sequence})")]
    FragmentNotFound {
        identifier: String,
        fragment: String,
        full_sequence: String,
    },

    #[error("candidate '{header}' was produced twice")]
    DuplicateCandidate { header: String },

    #[error("record '{identifier}' contains a non-UTF-8 sequence")]
    InvalidSequence { identifier: String },
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
