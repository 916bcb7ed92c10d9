use std::path::{Path, PathBuf};

pub mod aliases;
pub mod polls;
pub mod results;
pub mod table;

use aliases::{AliasPair, parse_aliases};
use polls::{PollLayout, RawPollRecord, parse_polls};
use results::{RawResultRow, parse_results};
use table::{Table, read_table};

use crate::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct InputPaths {
    pub results: PathBuf,
    pub polls: PathBuf,
    pub aliases: Option<PathBuf>,
    pub builtin_aliases: bool,
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub paths: InputPaths,
    pub results_table: Table,
    pub polls_table: Table,
    pub results: Vec<RawResultRow>,
    pub poll_layout: PollLayout,
    pub polls: Vec<RawPollRecord>,
    pub aliases: Vec<AliasPair>,
}

/// Loads all tables named by `paths`. Any unreadable or malformed file is
/// fatal; nothing is scored from a partial load.
pub fn load_input(paths: &InputPaths) -> Result<InputBundle, Error> {
    let results_table = load_table(&paths.results)?;
    let results =
        parse_results(&results_table).map_err(|e| Error::load(&paths.results, e))?;

    let polls_table = load_table(&paths.polls)?;
    let (poll_layout, polls) =
        parse_polls(&polls_table).map_err(|e| Error::load(&paths.polls, e))?;

    let aliases = match &paths.aliases {
        Some(path) => {
            let table = load_table(path)?;
            parse_aliases(&table).map_err(|e| Error::load(path, e))?
        }
        None => Vec::new(),
    };

    tracing::info!(
        "loaded {} result rows from {}, {} stations ({:?} layout) from {}, {} alias entries",
        results.len(),
        paths.results.display(),
        polls.len(),
        poll_layout,
        paths.polls.display(),
        aliases.len()
    );

    Ok(InputBundle {
        paths: paths.clone(),
        results_table,
        polls_table,
        results,
        poll_layout,
        polls,
        aliases,
    })
}

pub fn load_table(path: &Path) -> Result<Table, Error> {
    read_table(path).map_err(|e| Error::load(path, e))
}

/// Parses a poll figure such as `34.5%`, `**34.5%**` or `34.5`. Anything
/// else (`-`, `n/a`, blank) is "no figure".
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '%' | '*'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
