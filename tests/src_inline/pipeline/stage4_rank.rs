use super::*;
use crate::model::poll::{PollEntry, PollRecord};
use crate::model::results::ResultEntry;
use crate::names::Resolution;
use crate::pipeline::stage2_normalize::{NameResolution, NameSource};
use crate::pipeline::stage3_score::run_stage3;

fn result(station: &str, pct: f64, missed: &[&str], falsely: &[&str]) -> AccuracyResult {
    AccuracyResult {
        station: station.to_string(),
        correct_count: 0,
        predicted_count: falsely.len(),
        denominator: 12,
        accuracy_pct: pct,
        correct: Vec::new(),
        missed: missed.iter().map(|s| s.to_string()).collect(),
        falsely_predicted: falsely.iter().map(|s| s.to_string()).collect(),
    }
}

fn actual(ids: &[&str], top_n: usize) -> ActualResult {
    ActualResult {
        standings: ids
            .iter()
            .enumerate()
            .map(|(idx, id)| ResultEntry {
                rank: idx + 1,
                id: id.to_string(),
                raw: id.to_string(),
                votes: None,
            })
            .collect(),
        top_n,
    }
}

fn poll(station: &str, ids: &[&str], top_n: usize) -> PollRecord {
    let standings: Vec<PollEntry> = ids
        .iter()
        .map(|id| PollEntry {
            id: id.to_string(),
            raw: id.to_string(),
            percentage: None,
        })
        .collect();
    PollRecord {
        station: station.to_string(),
        predictions: standings.iter().take(top_n).cloned().collect(),
        standings,
    }
}

fn stage2(actual: ActualResult, polls: Vec<PollRecord>) -> Stage2Output {
    Stage2Output {
        actual,
        polls,
        candidates: Vec::new(),
        resolutions: Vec::new(),
    }
}

#[test]
fn test_rank_descending_with_station_tiebreak() {
    let results = vec![
        result("SWS", 75.0, &[], &[]),
        result("Pulse Asia", 83.3, &[], &[]),
        result("Octa", 75.0, &[], &[]),
        result("Boses", 50.0, &[], &[]),
    ];
    let ranked = rank_stations(&results);
    let order: Vec<&str> = ranked.iter().map(|r| r.station.as_str()).collect();
    assert_eq!(order, vec!["Pulse Asia", "Octa", "SWS", "Boses"]);
    let positions: Vec<usize> = ranked.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    assert!(ranked.windows(2).all(|w| w[0].accuracy_pct >= w[1].accuracy_pct));
}

#[test]
fn test_ranking_is_independent_of_input_order() {
    let mut results = vec![
        result("B", 50.0, &[], &[]),
        result("A", 50.0, &[], &[]),
        result("C", 90.0, &[], &[]),
    ];
    let first = rank_stations(&results);
    results.reverse();
    assert_eq!(rank_stations(&results), first);
}

#[test]
fn test_missed_frequency_lists_every_winner() {
    let actual = actual(&["A", "B", "C", "D"], 3);
    let results = vec![
        result("S1", 0.0, &["B", "C"], &[]),
        result("S2", 0.0, &["C"], &[]),
        result("S3", 0.0, &[], &[]),
        result("S4", 0.0, &["B", "C"], &[]),
    ];
    let missed = missed_frequency(&results, &actual);
    let rows: Vec<(&str, usize)> = missed
        .iter()
        .map(|e| (e.candidate.as_str(), e.count))
        .collect();
    assert_eq!(rows, vec![("C", 3), ("B", 2), ("A", 0)]);
    assert_eq!(missed[0].share_pct, 75.0);
    assert_eq!(missed[0].actual_rank, Some(3));
}

#[test]
fn test_false_frequency_ties_by_name() {
    let results = vec![
        result("S1", 0.0, &[], &["Z", "M"]),
        result("S2", 0.0, &[], &["M", "Q"]),
        result("S3", 0.0, &[], &["Z"]),
    ];
    let falsely = false_frequency(&results);
    let rows: Vec<(&str, usize)> = falsely
        .iter()
        .map(|e| (e.candidate.as_str(), e.count))
        .collect();
    assert_eq!(rows, vec![("M", 2), ("Z", 2), ("Q", 1)]);
    assert_eq!(falsely[2].share_pct, 33.3);
    assert!(falsely.iter().all(|e| e.actual_rank.is_none()));
}

#[test]
fn test_summary_stats_podium() {
    let results: Vec<AccuracyResult> = [100.0, 90.0, 80.0, 70.0, 60.0]
        .iter()
        .enumerate()
        .map(|(i, pct)| result(&format!("S{i}"), *pct, &[], &[]))
        .collect();
    let stats = summary_stats(&rank_stations(&results));
    assert_eq!(stats.n_stations, 5);
    assert!((stats.mean_accuracy_pct - 80.0).abs() < 1e-9);
    let best: Vec<&str> = stats.most_accurate.iter().map(|r| r.station.as_str()).collect();
    let worst: Vec<&str> = stats.least_accurate.iter().map(|r| r.station.as_str()).collect();
    assert_eq!(best, vec!["S0", "S1", "S2"]);
    assert_eq!(worst, vec!["S2", "S3", "S4"]);
}

#[test]
fn test_summary_stats_small_and_empty() {
    let stats = summary_stats(&[]);
    assert_eq!(stats.n_stations, 0);
    assert_eq!(stats.mean_accuracy_pct, 0.0);
    assert!(stats.most_accurate.is_empty());

    let one = rank_stations(&[result("Only", 40.0, &[], &[])]);
    let stats = summary_stats(&one);
    assert_eq!(stats.most_accurate.len(), 1);
    assert_eq!(stats.least_accurate.len(), 1);
}

#[test]
fn test_flags_raised() {
    let profile = ScoringProfile::senate_v1();
    let mut dataset = stage2(
        actual(&["A", "B"], 3),
        vec![poll("S1", &["A", "A", "C"], 3), poll("S2", &["A"], 3)],
    );
    dataset.resolutions.push(NameResolution {
        source: NameSource::Polls,
        raw: "C".to_string(),
        id: "C".to_string(),
        via: Resolution::Unmapped,
    });
    let results = run_stage3(&dataset, &profile);
    let output = run_stage4(&dataset, &results, &profile);
    assert_eq!(
        output.flags,
        vec![
            AnalysisFlag::IncompleteResults,
            AnalysisFlag::UnmappedNames,
            AnalysisFlag::ShortPrediction,
            AnalysisFlag::DuplicatePredictions,
        ]
    );
}

#[test]
fn test_clean_run_has_no_flags() {
    let profile = ScoringProfile {
        top_n: 2,
        ..ScoringProfile::senate_v1()
    };
    let dataset = stage2(
        actual(&["A", "B", "C"], 2),
        vec![poll("S1", &["A", "C", "B"], 2), poll("S2", &["B", "A"], 2)],
    );
    let results = run_stage3(&dataset, &profile);
    let output = run_stage4(&dataset, &results, &profile);
    assert!(output.flags.is_empty());
    assert_eq!(output.ranked[0].station, "S2");
    assert_eq!(output.ranked[0].accuracy_pct, 100.0);
    assert_eq!(output.ranked[1].accuracy_pct, 50.0);
    assert_eq!(output.falsely_predicted[0].candidate, "C");
}
