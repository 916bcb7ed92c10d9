use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitStatus {
    /// Predicted and among the winners.
    Correct,
    /// Among the winners but not predicted.
    Missed,
    /// Predicted but not among the winners.
    FalselyPredicted,
}

impl HitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HitStatus::Correct => "correct",
            HitStatus::Missed => "missed",
            HitStatus::FalselyPredicted => "falsely_predicted",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            HitStatus::Correct => "✓",
            HitStatus::Missed | HitStatus::FalselyPredicted => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyResult {
    pub station: String,
    pub correct_count: usize,
    /// Distinct predictions after normalization.
    pub predicted_count: usize,
    pub denominator: usize,
    pub accuracy_pct: f64,
    /// In predicted order.
    pub correct: Vec<String>,
    /// In finishing order.
    pub missed: Vec<String>,
    /// In predicted order.
    pub falsely_predicted: Vec<String>,
}

impl AccuracyResult {
    pub fn status_of(&self, id: &str) -> Option<HitStatus> {
        if self.correct.iter().any(|c| c == id) {
            Some(HitStatus::Correct)
        } else if self.missed.iter().any(|c| c == id) {
            Some(HitStatus::Missed)
        } else if self.falsely_predicted.iter().any(|c| c == id) {
            Some(HitStatus::FalselyPredicted)
        } else {
            None
        }
    }
}
