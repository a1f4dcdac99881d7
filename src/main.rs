use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use mirflank::cli::Args;
use mirflank::pipeline;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stats = pipeline::run(&args.to_config())?;
    tracing::info!(
        alignment_records = stats.alignment_records,
        resolved_reads = stats.resolved_reads,
        base_warnings = stats.base_warnings,
        collapsed_matched = stats.collapsed_matched,
        unmatched_resolved = stats.unmatched_resolved,
        expanded_reads = stats.expanded_reads,
        candidates = stats.candidates,
        upstream_pass = stats.upstream_pass,
        downstream_pass = stats.downstream_pass,
        metrics_rows = stats.metrics_rows,
        "mirflank: processing complete"
    );
    Ok(())
}
