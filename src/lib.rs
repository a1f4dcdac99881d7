//! mirflank: recover the non-miRNA side of chimeric reads from miRNA-to-read alignments.
//!
//! Stages run strictly in order, each consuming the previous one's output:
//!
//! 1. [`alignment::reconstruct`] undoes the aligner's mismatches to get the read fragment.
//! 2. [`index::AlignmentIndex`] keeps one fragment per collapsed read and counts alignments.
//! 3. [`expand::expand`] hands each fragment to every read with the same full sequence.
//! 4. [`flank::extract`] cuts each read into upstream/downstream flanks.
//!
//! # Library usage
//!
//! ```no_run
//! use mirflank::{run, PipelineConfig};
//!
//! let mut config = PipelineConfig::new("mirs.bowtie", "reads.collapsed.fa", "out.fa", "metrics.tsv");
//! config.min_flank_len = 20;
//! let stats = run(&config)?;
//! println!("{} candidates", stats.candidates);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod alignment;
pub mod cli;
pub mod error;
pub mod expand;
pub mod fasta;
pub mod flank;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod types;

pub use alignment::{reconstruct, AlignmentRecord, MismatchDescriptor, Reconstruction};
pub use error::{Error, Result};
pub use expand::{expand, ExpandedEntry, SequenceIndex};
pub use fasta::{FastaReader, FullSequenceRecord};
pub use flank::{extract, CandidateRecord, Extraction, FlankMetrics, DEFAULT_MIN_FLANK_LEN};
pub use index::{AlignmentIndex, CollisionPolicy, IndexOptions, ResolvedFragment};
pub use output::MetricsRow;
pub use pipeline::{run, PipelineConfig, Stats};
pub use types::{FlankKind, Strand};
