use crate::model::accuracy::AccuracyResult;
use crate::model::poll::PollRecord;
use crate::model::profile::{DenominatorPolicy, ScoringProfile};
use crate::model::results::ActualResult;
use crate::pipeline::stage2_normalize::Stage2Output;

/// Scores one station against the actual winners. Repeated predictions are
/// collapsed before intersecting, so `correct + falsely_predicted` always
/// equals `predicted_count` and `correct + missed` equals the winner count.
pub fn score_station(
    record: &PollRecord,
    actual: &ActualResult,
    profile: &ScoringProfile,
) -> AccuracyResult {
    let predicted = record.distinct_predictions();
    let winners = actual.winner_ids();

    let mut correct = Vec::new();
    let mut falsely_predicted = Vec::new();
    for id in &predicted {
        if winners.contains(id) {
            correct.push(id.to_string());
        } else {
            falsely_predicted.push(id.to_string());
        }
    }
    let missed: Vec<String> = winners
        .iter()
        .filter(|id| !predicted.contains(*id))
        .map(|id| id.to_string())
        .collect();

    let denominator = match profile.denominator {
        DenominatorPolicy::Winners => winners.len(),
        DenominatorPolicy::Predicted => predicted.len(),
    };
    let accuracy_pct = if denominator == 0 {
        0.0
    } else {
        profile.round_pct(correct.len() as f64 * 100.0 / denominator as f64)
    };

    AccuracyResult {
        station: record.station.clone(),
        correct_count: correct.len(),
        predicted_count: predicted.len(),
        denominator,
        accuracy_pct,
        correct,
        missed,
        falsely_predicted,
    }
}

pub fn run_stage3(stage2: &Stage2Output, profile: &ScoringProfile) -> Vec<AccuracyResult> {
    let mut results = Vec::with_capacity(stage2.polls.len());
    for record in &stage2.polls {
        let result = score_station(record, &stage2.actual, profile);
        tracing::debug!(
            "station {:?}: {}/{} correct ({}%)",
            result.station,
            result.correct_count,
            result.denominator,
            profile.format_pct(result.accuracy_pct)
        );
        results.push(result);
    }
    results
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_score.rs"]
mod tests;
