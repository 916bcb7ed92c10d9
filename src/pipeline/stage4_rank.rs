use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::accuracy::AccuracyResult;
use crate::model::flags::{AnalysisFlag, flag_order};
use crate::model::profile::ScoringProfile;
use crate::model::results::ActualResult;
use crate::pipeline::stage2_normalize::Stage2Output;

/// Stations listed as most and least accurate in the summary.
pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    pub position: usize,
    pub station: String,
    pub correct_count: usize,
    pub denominator: usize,
    pub accuracy_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub candidate: String,
    /// Stations that missed (or falsely included) this candidate.
    pub count: usize,
    /// `count` as a share of all stations, one decimal.
    pub share_pct: f64,
    pub actual_rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub n_stations: usize,
    pub mean_accuracy_pct: f64,
    pub most_accurate: Vec<RankedStation>,
    pub least_accurate: Vec<RankedStation>,
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub ranked: Vec<RankedStation>,
    pub missed: Vec<FrequencyEntry>,
    pub falsely_predicted: Vec<FrequencyEntry>,
    pub stats: SummaryStats,
    pub flags: Vec<AnalysisFlag>,
}

/// Accuracy descending; equal accuracy falls back to station id ascending.
pub fn rank_stations(results: &[AccuracyResult]) -> Vec<RankedStation> {
    let mut order: Vec<&AccuracyResult> = results.iter().collect();
    order.sort_by(|a, b| match b.accuracy_pct.total_cmp(&a.accuracy_pct) {
        std::cmp::Ordering::Equal => a.station.cmp(&b.station),
        other => other,
    });
    order
        .into_iter()
        .enumerate()
        .map(|(idx, r)| RankedStation {
            position: idx + 1,
            station: r.station.clone(),
            correct_count: r.correct_count,
            denominator: r.denominator,
            accuracy_pct: r.accuracy_pct,
        })
        .collect()
}

/// How many stations left each actual winner out. Every winner is listed,
/// including those no station missed.
pub fn missed_frequency(results: &[AccuracyResult], actual: &ActualResult) -> Vec<FrequencyEntry> {
    let n_stations = results.len();
    let mut entries: Vec<FrequencyEntry> = actual
        .winners()
        .iter()
        .map(|winner| {
            let count = results
                .iter()
                .filter(|r| r.missed.iter().any(|m| *m == winner.id))
                .count();
            FrequencyEntry {
                candidate: winner.id.clone(),
                count,
                share_pct: share_pct(count, n_stations),
                actual_rank: Some(winner.rank),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.actual_rank.cmp(&b.actual_rank)));
    entries
}

/// How many stations included each non-winner in their top N.
pub fn false_frequency(results: &[AccuracyResult]) -> Vec<FrequencyEntry> {
    let n_stations = results.len();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in results {
        for candidate in &r.falsely_predicted {
            *counts.entry(candidate.as_str()).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(candidate, count)| FrequencyEntry {
            candidate: candidate.to_string(),
            count,
            share_pct: share_pct(count, n_stations),
            actual_rank: None,
        })
        .collect();
    // BTreeMap order already sorts equal counts by name; the sort is stable.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

fn share_pct(count: usize, n_stations: usize) -> f64 {
    if n_stations == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / n_stations as f64).round() / 10.0
}

pub fn summary_stats(ranked: &[RankedStation]) -> SummaryStats {
    let n_stations = ranked.len();
    let mean_accuracy_pct = if n_stations == 0 {
        0.0
    } else {
        ranked.iter().map(|r| r.accuracy_pct).sum::<f64>() / n_stations as f64
    };
    let podium = PODIUM_SIZE.min(n_stations);
    SummaryStats {
        n_stations,
        mean_accuracy_pct,
        most_accurate: ranked[..podium].to_vec(),
        least_accurate: ranked[n_stations - podium..].to_vec(),
    }
}

pub fn analysis_flags(stage2: &Stage2Output, results: &[AccuracyResult]) -> Vec<AnalysisFlag> {
    let mut raised = Vec::new();
    for &flag in flag_order() {
        let on = match flag {
            AnalysisFlag::IncompleteResults => !stage2.actual.is_complete(),
            AnalysisFlag::UnmappedNames => stage2.unmapped().next().is_some(),
            AnalysisFlag::ShortPrediction => stage2
                .polls
                .iter()
                .any(|p| p.predictions.len() < stage2.actual.top_n),
            AnalysisFlag::DuplicatePredictions => results.iter().zip(&stage2.polls).any(
                |(r, p)| r.predicted_count < p.predictions.len(),
            ),
        };
        if on {
            raised.push(flag);
        }
    }
    raised
}

pub fn run_stage4(
    stage2: &Stage2Output,
    results: &[AccuracyResult],
    profile: &ScoringProfile,
) -> Stage4Output {
    let ranked = rank_stations(results);
    let missed = missed_frequency(results, &stage2.actual);
    let falsely_predicted = false_frequency(results);
    let stats = summary_stats(&ranked);
    let flags = analysis_flags(stage2, results);

    if let Some(best) = ranked.first() {
        tracing::info!(
            "{} stations ranked; best {:?} at {}%, mean {:.2}%",
            ranked.len(),
            best.station,
            profile.format_pct(best.accuracy_pct),
            stats.mean_accuracy_pct
        );
    }
    for flag in flags.iter().filter(|f| f.is_degrading()) {
        tracing::warn!("degraded analysis: {}", flag.as_str());
    }

    Stage4Output {
        ranked,
        missed,
        falsely_predicted,
        stats,
        flags,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rank.rs"]
mod tests;
