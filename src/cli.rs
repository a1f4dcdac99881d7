use crate::flank::DEFAULT_MIN_FLANK_LEN;
use crate::index::{CollisionPolicy, IndexOptions, DEFAULT_COLLAPSE_DELIMITER};
use crate::pipeline::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mirflank",
    about = "Extract candidate chimeric flanks from miRNA-to-read alignments",
    version
)]
pub struct Args {
    /// Bowtie output with miRNAs aligned against collapsed reads
    #[arg(long = "bowtie-align", alias = "alignments", value_name = "TSV")]
    pub bowtie_align: PathBuf,

    /// Collapsed read FASTA the alignments were made against
    #[arg(long = "fa-file", value_name = "FASTA")]
    pub fa_file: PathBuf,

    /// FASTA whose reads inherit alignments by identical sequence (defaults to --fa-file)
    #[arg(long = "expand-fa-file", value_name = "FASTA")]
    pub expand_fa_file: Option<PathBuf>,

    /// Output FASTA of candidate flanks
    #[arg(long = "out-file", value_name = "FASTA")]
    pub out_file: PathBuf,

    /// Output metrics table (TSV)
    #[arg(long = "metrics-file", value_name = "TSV")]
    pub metrics_file: PathBuf,

    /// Minimum flank length reported as a candidate
    #[arg(long = "min-seq-len", default_value_t = DEFAULT_MIN_FLANK_LEN)]
    pub min_seq_len: usize,

    /// Character separating a collapsed read name from its copy count
    #[arg(long = "collapse-delimiter", default_value_t = DEFAULT_COLLAPSE_DELIMITER)]
    pub collapse_delimiter: char,

    /// Which alignment to keep when several miRNAs align to one read
    #[arg(long = "collision-policy", value_enum, default_value_t = CollisionPolicy::LastWins)]
    pub collision_policy: CollisionPolicy,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(
            &self.bowtie_align,
            &self.fa_file,
            &self.out_file,
            &self.metrics_file,
        );
        if let Some(path) = &self.expand_fa_file {
            config.expand_fasta = path.clone();
        }
        config.min_flank_len = self.min_seq_len;
        config.index = IndexOptions {
            collapse_delimiter: self.collapse_delimiter,
            collision_policy: self.collision_policy,
        };
        config
    }
}
