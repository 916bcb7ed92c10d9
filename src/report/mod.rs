pub mod json;
pub mod prepared;
pub mod text;

use serde::Serialize;

use crate::model::flags::AnalysisFlag;
use crate::model::profile::ScoringProfile;
use crate::pipeline::stage4_rank::{FrequencyEntry, RankedStation};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputsMeta {
    pub results: String,
    pub polls: String,
    pub aliases: Option<String>,
    pub poll_layout: String,
    pub builtin_aliases: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnmappedName {
    pub source: String,
    pub raw: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub inputs: InputsMeta,
    pub profile: ScoringProfile,
    pub flags: Vec<AnalysisFlag>,

    pub n_candidates: usize,
    pub n_winners: usize,
    pub n_stations: usize,
    pub winners: Vec<String>,

    pub mean_accuracy_pct: f64,
    pub stations: Vec<RankedStation>,
    pub most_accurate: Vec<RankedStation>,
    pub least_accurate: Vec<RankedStation>,

    pub most_missed: Vec<FrequencyEntry>,
    pub most_falsely_predicted: Vec<FrequencyEntry>,

    pub unmapped_names: Vec<UnmappedName>,
}

pub fn format_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", format_figure(v)),
        None => "-".to_string(),
    }
}

/// Poll figures as published: no trailing zeros, at most two decimals.
pub fn format_figure(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

pub fn format_rank(rank: Option<usize>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_default()
}

pub fn join_names(names: &[String]) -> String {
    names.join(";")
}

/// Entries with a non-zero count, at most `limit` of them.
pub fn top_nonzero(entries: &[FrequencyEntry], limit: usize) -> Vec<FrequencyEntry> {
    entries
        .iter()
        .filter(|e| e.count > 0)
        .take(limit)
        .cloned()
        .collect()
}

pub fn flags_label(flags: &[AnalysisFlag]) -> String {
    if flags.is_empty() {
        return "none".to_string();
    }
    flags
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn profile_pct(profile: &ScoringProfile, value: f64) -> String {
    format!("{}%", profile.format_pct(value))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
