use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisFlag {
    IncompleteResults,
    UnmappedNames,
    ShortPrediction,
    DuplicatePredictions,
}

impl AnalysisFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisFlag::IncompleteResults => "INCOMPLETE_RESULTS",
            AnalysisFlag::UnmappedNames => "UNMAPPED_NAMES",
            AnalysisFlag::ShortPrediction => "SHORT_PREDICTION",
            AnalysisFlag::DuplicatePredictions => "DUPLICATE_PREDICTIONS",
        }
    }

    /// Flags that mean the headline numbers rest on degraded input.
    pub fn is_degrading(self) -> bool {
        matches!(
            self,
            AnalysisFlag::IncompleteResults | AnalysisFlag::UnmappedNames
        )
    }
}

pub fn flag_order() -> &'static [AnalysisFlag] {
    &[
        AnalysisFlag::IncompleteResults,
        AnalysisFlag::UnmappedNames,
        AnalysisFlag::ShortPrediction,
        AnalysisFlag::DuplicatePredictions,
    ]
}
