use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorPolicy {
    /// Divide by the number of actual winners; unfilled prediction slots
    /// count as misses.
    Winners,
    /// Divide by the number of distinct predictions the station made.
    Predicted,
}

impl fmt::Display for DenominatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenominatorPolicy::Winners => f.write_str("winners"),
            DenominatorPolicy::Predicted => f.write_str("predicted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringProfile {
    pub top_n: usize,
    /// Decimal places kept in accuracy percentages.
    pub precision: u32,
    pub denominator: DenominatorPolicy,
    /// Rows listed in the best/worst and frequency tables.
    pub highlight: usize,
    /// Rows shown in a station's full standings.
    pub standings_limit: usize,
}

impl ScoringProfile {
    pub const MAX_PRECISION: u32 = 6;

    pub fn senate_v1() -> Self {
        Self {
            top_n: 12,
            precision: 1,
            denominator: DenominatorPolicy::Winners,
            highlight: 5,
            standings_limit: 20,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top-n must be at least 1".to_string());
        }
        if self.precision > Self::MAX_PRECISION {
            return Err(format!(
                "precision must be at most {}",
                Self::MAX_PRECISION
            ));
        }
        Ok(())
    }

    /// Rounds half away from zero to `precision` decimals.
    pub fn round_pct(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (value * scale).round() / scale
    }

    pub fn format_pct(&self, value: f64) -> String {
        format!("{:.*}", self.precision as usize, value)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::senate_v1()
    }
}
