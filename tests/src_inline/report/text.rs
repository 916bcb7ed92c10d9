use super::*;
use crate::model::accuracy::{AccuracyResult, HitStatus};
use crate::model::flags::AnalysisFlag;
use crate::pipeline::stage5_detail::{ActualRow, PredictedRow, StandingRow};
use crate::report::{InputsMeta, ToolMeta, UnmappedName};

fn ranked(position: usize, station: &str, correct: usize, pct: f64) -> RankedStation {
    RankedStation {
        position,
        station: station.to_string(),
        correct_count: correct,
        denominator: 12,
        accuracy_pct: pct,
    }
}

fn summary() -> SummaryData {
    let stations = vec![
        ranked(1, "Pulse Asia", 10, 83.3),
        ranked(2, "SWS", 9, 75.0),
        ranked(3, "Octa", 6, 50.0),
    ];
    SummaryData {
        tool: ToolMeta {
            name: "pollscore".to_string(),
            version: "0.1.0".to_string(),
        },
        inputs: InputsMeta {
            results: "results.md".to_string(),
            polls: "polls.md".to_string(),
            aliases: None,
            poll_layout: "wide".to_string(),
            builtin_aliases: true,
        },
        profile: ScoringProfile::senate_v1(),
        flags: vec![AnalysisFlag::UnmappedNames],
        n_candidates: 20,
        n_winners: 12,
        n_stations: 3,
        winners: Vec::new(),
        mean_accuracy_pct: 69.433333,
        most_accurate: stations.clone(),
        least_accurate: stations.clone(),
        stations,
        most_missed: vec![FrequencyEntry {
            candidate: "Bam Aquino".to_string(),
            count: 3,
            share_pct: 100.0,
            actual_rank: Some(2),
        }],
        most_falsely_predicted: vec![FrequencyEntry {
            candidate: "Ben Tulfo".to_string(),
            count: 1,
            share_pct: 33.3,
            actual_rank: None,
        }],
        unmapped_names: vec![UnmappedName {
            source: "polls".to_string(),
            raw: "Mystery Person".to_string(),
        }],
    }
}

#[test]
fn test_summary_text_sections() {
    let text = render_summary_text(&summary());
    assert!(text.starts_with("Opinion Polling Accuracy Report\n"));
    assert!(text.contains("Flags: UNMAPPED_NAMES\n"));
    assert!(text.contains("  1. Pulse Asia  10/12   83.3%\n"));
    assert!(text.contains("3. Most accurate\n1. Pulse Asia: 10 correct (83.3%)\n"));
    assert!(text.contains("5. Overall average accuracy: 69.43%\n"));
    assert!(text.contains("- Bam Aquino: missed by 3 stations (100.0%)\n"));
    assert!(text.contains("- Ben Tulfo: included by 1 station (33.3%)\n"));
    assert!(text.contains("8. Unmapped names\n- Mystery Person (polls)\n"));
}

#[test]
fn test_summary_text_without_unmapped_or_frequencies() {
    let mut data = summary();
    data.unmapped_names.clear();
    data.most_missed.clear();
    let text = render_summary_text(&data);
    assert!(!text.contains("8. Unmapped names"));
    assert!(text.contains("most commonly missed\n(none)\n"));
}

#[test]
fn test_station_text() {
    let detail = StationDetail {
        station: "SWS".to_string(),
        top_n: 2,
        accuracy: AccuracyResult {
            station: "SWS".to_string(),
            correct_count: 1,
            predicted_count: 2,
            denominator: 2,
            accuracy_pct: 50.0,
            correct: vec!["Bong Go".to_string()],
            missed: vec!["Bam Aquino".to_string()],
            falsely_predicted: vec!["Ben Tulfo".to_string()],
        },
        predicted: vec![
            PredictedRow {
                position: 1,
                candidate: "Bong Go".to_string(),
                percentage: Some(61.1),
                status: HitStatus::Correct,
                actual_rank: Some(1),
            },
            PredictedRow {
                position: 2,
                candidate: "Ben Tulfo".to_string(),
                percentage: Some(40.0),
                status: HitStatus::FalselyPredicted,
                actual_rank: None,
            },
        ],
        actual: vec![
            ActualRow {
                position: 1,
                candidate: "Bong Go".to_string(),
                votes: Some(27_121_073),
                status: HitStatus::Correct,
                predicted_rank: Some(1),
            },
            ActualRow {
                position: 2,
                candidate: "Bam Aquino".to_string(),
                votes: None,
                status: HitStatus::Missed,
                predicted_rank: None,
            },
        ],
        standings: vec![StandingRow {
            position: 1,
            candidate: "Bong Go".to_string(),
            percentage: Some(61.1),
            in_actual_top: true,
        }],
    };
    let text = render_station_text(&detail, &ScoringProfile::senate_v1());
    assert!(text.starts_with("Opinion Polling: SWS\nCorrect predictions: 1 out of 2 (50.0%)\n"));
    assert!(text.contains(" 1. Bong Go ✓ (actual rank: 1)\n"));
    assert!(text.contains(" 2. Ben Tulfo ✗ (actual rank: not in top 2)\n"));
    assert!(text.contains(" 2. Bam Aquino ✗ (predicted rank: not in predicted top 2)\n"));
    assert!(text.contains("Poll percentages (top 1 of SWS)\n 1. + Bong Go 61.1%\n"));
}
