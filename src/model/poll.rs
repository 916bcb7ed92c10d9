use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollEntry {
    pub id: String,
    pub raw: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollRecord {
    pub station: String,
    /// The station's top N, best first. May hold fewer than N entries.
    pub predictions: Vec<PollEntry>,
    /// Everything the station published, best first.
    pub standings: Vec<PollEntry>,
}

impl PollRecord {
    /// Prediction identifiers with repeats removed; first occurrence wins.
    pub fn distinct_predictions(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.predictions
            .iter()
            .map(|e| e.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn percentage_of(&self, id: &str) -> Option<f64> {
        self.predictions
            .iter()
            .chain(self.standings.iter())
            .find(|e| e.id == id)
            .and_then(|e| e.percentage)
    }
}
