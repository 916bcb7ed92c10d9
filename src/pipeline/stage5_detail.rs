use serde::Serialize;

use crate::error::Error;
use crate::model::accuracy::{AccuracyResult, HitStatus};
use crate::model::poll::PollRecord;
use crate::model::profile::ScoringProfile;
use crate::model::results::ActualResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedRow {
    pub position: usize,
    pub candidate: String,
    pub percentage: Option<f64>,
    pub status: HitStatus,
    pub actual_rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualRow {
    pub position: usize,
    pub candidate: String,
    pub votes: Option<u64>,
    pub status: HitStatus,
    pub predicted_rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub candidate: String,
    pub percentage: Option<f64>,
    pub in_actual_top: bool,
}

/// Side-by-side view of one station: its prediction, the actual winners and
/// its published standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDetail {
    pub station: String,
    pub top_n: usize,
    pub accuracy: AccuracyResult,
    pub predicted: Vec<PredictedRow>,
    pub actual: Vec<ActualRow>,
    pub standings: Vec<StandingRow>,
}

pub fn build_station_detail(
    record: &PollRecord,
    actual: &ActualResult,
    result: &AccuracyResult,
    profile: &ScoringProfile,
) -> StationDetail {
    let distinct = record.distinct_predictions();

    let predicted = distinct
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            PredictedRow {
                position: idx + 1,
                candidate: id.to_string(),
                percentage: record.percentage_of(id),
                status: result
                    .status_of(id)
                    .unwrap_or(HitStatus::FalselyPredicted),
                actual_rank: actual.winner_rank(id),
            }
        })
        .collect();

    let actual_rows = actual
        .winners()
        .iter()
        .map(|winner| {
            let predicted_rank = distinct
                .iter()
                .position(|id| *id == winner.id)
                .map(|idx| idx + 1);
            ActualRow {
                position: winner.rank,
                candidate: winner.id.clone(),
                votes: winner.votes,
                status: if predicted_rank.is_some() {
                    HitStatus::Correct
                } else {
                    HitStatus::Missed
                },
                predicted_rank,
            }
        })
        .collect();

    let standings = record
        .standings
        .iter()
        .take(profile.standings_limit)
        .enumerate()
        .map(|(idx, entry)| StandingRow {
            position: idx + 1,
            candidate: entry.id.clone(),
            percentage: entry.percentage,
            in_actual_top: actual.is_winner(&entry.id),
        })
        .collect();

    StationDetail {
        station: record.station.clone(),
        top_n: actual.top_n,
        accuracy: result.clone(),
        predicted,
        actual: actual_rows,
        standings,
    }
}

/// Exact station id first, then a case-insensitive match.
pub fn find_station<'a>(records: &'a [PollRecord], name: &str) -> Result<&'a PollRecord, Error> {
    let name = name.trim();
    records
        .iter()
        .find(|r| r.station == name)
        .or_else(|| records.iter().find(|r| r.station.eq_ignore_ascii_case(name)))
        .ok_or_else(|| Error::UnknownStation {
            name: name.to_string(),
            known: records
                .iter()
                .map(|r| r.station.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_detail.rs"]
mod tests;
