// Candidate FASTA and metrics table writers.

use crate::error::{Error, Result};
use crate::flank::{CandidateRecord, FlankMetrics};
use crate::types::HashMap;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the metrics table (after the leading read name).
pub const METRICS_COLUMNS: [&str; 8] = [
    "count",
    "upstream_pass",
    "downstream_pass",
    "upstream",
    "fragment",
    "source_label",
    "downstream",
    "fullread",
];

/// One metrics line: an outer join of alignment counts and flank results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    pub identifier: String,
    pub alignment_count: Option<usize>,
    pub flanks: Option<FlankMetrics>,
}

/// Outer-join alignment counts with flank metrics by read name, sorted by read name.
pub fn merge_metrics(counts: &HashMap<String, usize>, metrics: Vec<FlankMetrics>) -> Vec<MetricsRow> {
    let mut rows: BTreeMap<String, MetricsRow> = counts
        .iter()
        .map(|(id, &count)| {
            (
                id.clone(),
                MetricsRow {
                    identifier: id.clone(),
                    alignment_count: Some(count),
                    flanks: None,
                },
            )
        })
        .collect();

    for m in metrics {
        let id = m.identifier.clone();
        let row = rows.entry(id.clone()).or_insert_with(|| MetricsRow {
            identifier: id,
            alignment_count: None,
            flanks: None,
        });
        row.flanks = Some(m);
    }

    rows.into_values().collect()
}

fn yes_no(pass: bool) -> &'static str {
    if pass {
        "yes"
    } else {
        "no"
    }
}

/// Write `>{header}\n{sequence}\n` for every candidate.
pub fn write_candidates<W: Write>(writer: &mut W, candidates: &IndexSet<CandidateRecord>) -> std::io::Result<()> {
    for candidate in candidates {
        writeln!(writer, ">{}", candidate.header())?;
        writeln!(writer, "{}", candidate.sequence)?;
    }
    Ok(())
}

/// Write the tab-separated metrics table with a header line. Missing sides stay blank.
pub fn write_metrics<W: Write>(writer: &mut W, rows: &[MetricsRow]) -> std::io::Result<()> {
    writeln!(writer, "read_name\t{}", METRICS_COLUMNS.join("\t"))?;
    for row in rows {
        let count = row
            .alignment_count
            .map(|c| c.to_string())
            .unwrap_or_default();
        write!(writer, "{}\t{}", row.identifier, count)?;
        match &row.flanks {
            Some(f) => writeln!(
                writer,
                "\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                yes_no(f.upstream_pass),
                yes_no(f.downstream_pass),
                f.upstream,
                f.fragment,
                f.source_label,
                f.downstream,
                f.full_sequence
            )?,
            None => writeln!(writer, "{}", "\t".repeat(METRICS_COLUMNS.len() - 1))?,
        }
    }
    Ok(())
}

/// Create `path` and run `body` against a buffered writer, flushing at the end.
pub fn write_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| Error::io(e, path))?;
    let mut writer = BufWriter::new(file);
    body(&mut writer).map_err(|e| Error::io(e, path))?;
    writer.flush().map_err(|e| Error::io(e, path))
}
