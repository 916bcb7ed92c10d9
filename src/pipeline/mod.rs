pub mod prepare;
pub mod stage2_normalize;
pub mod stage3_score;
pub mod stage4_rank;
pub mod stage5_detail;
pub mod stage6_report;

use crate::error::Error;
use crate::input::polls::PollLayout;
use crate::input::{InputPaths, load_input};
use crate::model::accuracy::AccuracyResult;
use crate::model::profile::ScoringProfile;
use stage2_normalize::{Stage2Output, build_normalizer, run_stage2};
use stage3_score::run_stage3;
use stage4_rank::{Stage4Output, run_stage4};
use stage5_detail::{StationDetail, build_station_detail, find_station};

/// Everything computed for one invocation. Nothing is cached across runs.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub paths: InputPaths,
    pub profile: ScoringProfile,
    pub poll_layout: PollLayout,
    pub dataset: Stage2Output,
    /// One per station, in input order.
    pub results: Vec<AccuracyResult>,
    pub ranking: Stage4Output,
}

impl Analysis {
    pub fn result_for(&self, station: &str) -> Option<&AccuracyResult> {
        self.results.iter().find(|r| r.station == station)
    }

    pub fn station_detail(&self, name: &str) -> Result<StationDetail, Error> {
        let record = find_station(&self.dataset.polls, name)?;
        let result = self.result_for(&record.station).ok_or_else(|| Error::UnknownStation {
            name: name.to_string(),
            known: String::new(),
        })?;
        Ok(build_station_detail(
            record,
            &self.dataset.actual,
            result,
            &self.profile,
        ))
    }
}

pub fn run_analysis(paths: &InputPaths, profile: &ScoringProfile) -> Result<Analysis, Error> {
    profile.validate().map_err(Error::Profile)?;

    let bundle = load_input(paths)?;
    let normalizer = build_normalizer(&bundle);
    let dataset = run_stage2(&bundle, &normalizer, profile);
    let results = run_stage3(&dataset, profile);
    let ranking = run_stage4(&dataset, &results, profile);

    Ok(Analysis {
        paths: paths.clone(),
        profile: profile.clone(),
        poll_layout: bundle.poll_layout,
        dataset,
        results,
        ranking,
    })
}
