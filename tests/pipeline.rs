mod common;

use common::*;
use mirflank::{run, CollisionPolicy, Error, PipelineConfig, Stats};
use pretty_assertions::assert_eq;
use std::fs;

fn config(fx: &Fixture) -> PipelineConfig {
    PipelineConfig::new(&fx.alignments, &fx.collapsed, &fx.out_fasta, &fx.out_metrics)
}

#[test]
fn test_single_fasta_resolves_collapsed_reads() {
    let fx = Fixture::new();
    let stats = run(&config(&fx)).unwrap();

    assert_eq!(
        stats,
        Stats {
            alignment_records: 4,
            resolved_reads: 3,
            base_warnings: 0,
            collapsed_matched: 2,
            unmatched_resolved: 1,
            expanded_reads: 2,
            candidates: 2,
            upstream_pass: 0,
            downstream_pass: 2,
            metrics_rows: 3,
        }
    );
    assert_eq!(
        read_candidates(&fx.out_fasta),
        vec![
            ("c1_+_downstream".to_string(), S1_DOWNSTREAM.to_string()),
            ("c2_-_downstream".to_string(), S2_DOWNSTREAM.to_string()),
        ]
    );

    let metrics = fs::read_to_string(&fx.out_metrics).unwrap();
    let lines: Vec<&str> = metrics.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[1],
        format!("c1\t2\tno\tyes\t{S1_UPSTREAM}\tTGAGGTAGTAGGTTGTATAGTT\tmiR-a\t{S1_DOWNSTREAM}\t{S1}")
    );
    assert_eq!(
        lines[2],
        format!("c2\t1\tno\tyes\t{S2_UPSTREAM}\tCTATACAACCTACTACCTCA\tmiR-b\t{S2_DOWNSTREAM}\t{S2}")
    );
    assert_eq!(lines[3], "c9\t1\t\t\t\t\t\t\t");
}

#[test]
fn test_uncollapsed_reads_inherit_alignment() {
    let fx = Fixture::new();
    let mut cfg = config(&fx);
    cfg.expand_fasta = fx.all_reads.clone();
    let stats = run(&cfg).unwrap();

    assert_eq!(stats.expanded_reads, 3);
    assert_eq!(
        read_candidates(&fx.out_fasta),
        vec![
            ("u1_+_downstream".to_string(), S1_DOWNSTREAM.to_string()),
            ("u3_-_downstream".to_string(), S2_DOWNSTREAM.to_string()),
            ("u2_+_downstream".to_string(), S1_DOWNSTREAM.to_string()),
        ]
    );

    let metrics = fs::read_to_string(&fx.out_metrics).unwrap();
    let ids: Vec<&str> = metrics
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(ids, vec!["c1", "c2", "c9", "u1", "u2", "u3"]);

    // Duplicates of one collapsed read carry identical alignment columns.
    let row = |id: &str| -> Vec<String> {
        metrics
            .lines()
            .find(|l| l.starts_with(&format!("{id}\t")))
            .unwrap()
            .split('\t')
            .skip(2)
            .map(str::to_string)
            .collect()
    };
    assert_eq!(row("u1"), row("u2"));
    assert!(metrics.lines().any(|l| l.starts_with("u1\t\tno\tyes")));
}

#[test]
fn test_zero_min_length_keeps_short_flanks() {
    let fx = Fixture::new();
    let mut cfg = config(&fx);
    cfg.min_flank_len = 0;
    run(&cfg).unwrap();

    let candidates = read_candidates(&fx.out_fasta);
    assert_eq!(candidates.len(), 4);
    assert!(candidates.contains(&("c1_+_upstream".to_string(), S1_UPSTREAM.to_string())));
    assert!(candidates.contains(&("c2_-_upstream".to_string(), S2_UPSTREAM.to_string())));
}

#[test]
fn test_min_length_boundary_is_inclusive() {
    let fx = Fixture::new();
    let mut cfg = config(&fx);

    cfg.min_flank_len = S1_DOWNSTREAM.len();
    run(&cfg).unwrap();
    assert!(read_candidates(&fx.out_fasta).iter().any(|(h, _)| h == "c1_+_downstream"));

    cfg.min_flank_len = S1_DOWNSTREAM.len() + 1;
    run(&cfg).unwrap();
    assert!(!read_candidates(&fx.out_fasta).iter().any(|(h, _)| h == "c1_+_downstream"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let fx = Fixture::new();
    let mut cfg = config(&fx);
    cfg.expand_fasta = fx.all_reads.clone();

    run(&cfg).unwrap();
    let fasta = fs::read(&fx.out_fasta).unwrap();
    let metrics = fs::read(&fx.out_metrics).unwrap();

    run(&cfg).unwrap();
    assert_eq!(fs::read(&fx.out_fasta).unwrap(), fasta);
    assert_eq!(fs::read(&fx.out_metrics).unwrap(), metrics);
}

#[test]
fn test_wrong_reconstruction_aborts_without_output() {
    let bad = ALIGNMENTS.replace("3:G>C", "3:T>C");
    let fx = Fixture::with_alignments(&bad);
    let err = run(&config(&fx)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::FragmentNotFound { identifier, .. }) if identifier == "c1"
    ));
    assert!(!fx.out_fasta.exists());
    assert!(!fx.out_metrics.exists());
}

#[test]
fn test_seven_column_line_aborts_without_output() {
    let bad = ALIGNMENTS.replace("\t0\t1:C>G", "\t1:C>G");
    let fx = Fixture::with_alignments(&bad);
    let err = run(&config(&fx)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::MalformedLine { line: 3, .. })
    ));
    assert!(!fx.out_fasta.exists());
    assert!(!fx.out_metrics.exists());
}

#[test]
fn test_reject_policy_flags_multi_hit_reads() {
    let fx = Fixture::new();
    let mut cfg = config(&fx);
    cfg.index.collision_policy = CollisionPolicy::Reject;

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::DuplicateAlignment { .. })));
}

#[test]
fn test_empty_expansion_fasta_keeps_alignment_counts() {
    let fx = Fixture::new();
    let empty = fx.dir.path().join("empty.fa");
    fs::write(&empty, "").unwrap();
    let mut cfg = config(&fx);
    cfg.expand_fasta = empty;

    let stats = run(&cfg).unwrap();
    assert_eq!(stats.expanded_reads, 0);
    assert_eq!(stats.candidates, 0);
    assert_eq!(fs::read_to_string(&fx.out_fasta).unwrap(), "");

    let metrics = fs::read_to_string(&fx.out_metrics).unwrap();
    let rows: Vec<&str> = metrics.lines().skip(1).collect();
    assert_eq!(rows, vec!["c1\t2\t\t\t\t\t\t\t", "c2\t1\t\t\t\t\t\t\t", "c9\t1\t\t\t\t\t\t\t"]);
}
