use std::cmp::Ordering;

use crate::input::table::{Table, TableRow};
use crate::input::{InputError, parse_percentage};

pub const CANDIDATE_COLUMNS: &[&str] = &["Standardized Name", "Candidate", "Candidate Name", "Name"];
pub const STATION_COLUMNS: &[&str] = &["Station", "Polling Station", "Pollster", "Opinion Polling"];
pub const RANK_COLUMNS: &[&str] = &["Rank", "Predicted Rank"];
pub const PERCENTAGE_COLUMNS: &[&str] = &["Percentage", "Percent", "Share", "Predicted Percentage"];

/// Columns of the wide layout that never hold station figures.
const NON_STATION_COLUMNS: &[&str] = &[
    "Standardized Name",
    "Candidate",
    "Candidate Name",
    "Name",
    "Party",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollLayout {
    /// One row per candidate, one column per station.
    Wide,
    /// One row per (station, candidate) pair.
    Long,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPollEntry {
    pub name: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPollRecord {
    pub station: String,
    /// Every candidate the station published, best first.
    pub standings: Vec<RawPollEntry>,
}

pub fn detect_layout(table: &Table) -> PollLayout {
    if table.column(STATION_COLUMNS).is_some() {
        PollLayout::Long
    } else {
        PollLayout::Wide
    }
}

pub fn station_columns(table: &Table) -> Vec<usize> {
    table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            !h.is_empty() && !NON_STATION_COLUMNS.iter().any(|n| h.eq_ignore_ascii_case(n))
        })
        .map(|(idx, _)| idx)
        .collect()
}

pub fn parse_polls(table: &Table) -> Result<(PollLayout, Vec<RawPollRecord>), InputError> {
    let layout = detect_layout(table);
    let records = match layout {
        PollLayout::Wide => parse_wide(table)?,
        PollLayout::Long => parse_long(table)?,
    };
    if records.is_empty() {
        return Err(InputError::Parse(
            "opinion-poll table has no polling stations".to_string(),
        ));
    }
    Ok((layout, records))
}

fn candidate_column(table: &Table) -> Result<usize, InputError> {
    table.column(CANDIDATE_COLUMNS).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "opinion-poll table has no candidate column (expected one of: {})",
            CANDIDATE_COLUMNS.join(", ")
        ))
    })
}

fn parse_wide(table: &Table) -> Result<Vec<RawPollRecord>, InputError> {
    let name_col = candidate_column(table)?;
    let mut records: Vec<RawPollRecord> = Vec::new();

    for col in station_columns(table) {
        let station = table.headers[col].trim().to_string();
        if records.iter().any(|r| r.station == station) {
            tracing::warn!("duplicate station column {station:?}; keeping first");
            continue;
        }

        let mut standings = Vec::new();
        for row in &table.rows {
            let name = table.cell(row, name_col).trim();
            if name.is_empty() {
                continue;
            }
            // Stations that did not publish a figure for a candidate are
            // treated as not ranking them at all.
            if let Some(percentage) = parse_percentage(table.cell(row, col)) {
                standings.push(RawPollEntry {
                    name: name.to_string(),
                    percentage: Some(percentage),
                });
            }
        }
        sort_by_percentage(&mut standings);
        records.push(RawPollRecord { station, standings });
    }

    Ok(records)
}

fn parse_long(table: &Table) -> Result<Vec<RawPollRecord>, InputError> {
    let name_col = candidate_column(table)?;
    let station_col = table.column(STATION_COLUMNS).ok_or_else(|| {
        InputError::InvalidInput("opinion-poll table has no station column".to_string())
    })?;
    let rank_col = table.column(RANK_COLUMNS);
    let pct_col = table.column(PERCENTAGE_COLUMNS);

    // (station, rows) in first-appearance order
    let mut grouped: Vec<(String, Vec<(Option<usize>, RawPollEntry)>)> = Vec::new();
    for row in &table.rows {
        let station = table.cell(row, station_col).trim();
        let name = table.cell(row, name_col).trim();
        if station.is_empty() || name.is_empty() {
            tracing::warn!(
                "poll row is missing a station or candidate; skipping (line {})",
                row.line
            );
            continue;
        }
        let rank = match rank_col {
            Some(idx) => Some(parse_rank(table, row, idx)?),
            None => None,
        };
        let percentage = pct_col.and_then(|idx| parse_percentage(table.cell(row, idx)));
        let entry = RawPollEntry {
            name: name.to_string(),
            percentage,
        };
        match grouped.iter_mut().find(|(s, _)| s == station) {
            Some((_, entries)) => entries.push((rank, entry)),
            None => grouped.push((station.to_string(), vec![(rank, entry)])),
        }
    }

    let mut records = Vec::with_capacity(grouped.len());
    for (station, mut entries) in grouped {
        if rank_col.is_some() {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }
        let mut standings: Vec<RawPollEntry> = entries.into_iter().map(|(_, e)| e).collect();
        if rank_col.is_none() && pct_col.is_some() {
            sort_by_percentage(&mut standings);
        }
        records.push(RawPollRecord { station, standings });
    }
    Ok(records)
}

fn parse_rank(table: &Table, row: &TableRow, idx: usize) -> Result<usize, InputError> {
    let raw = table.cell(row, idx).trim();
    raw.trim_end_matches('.')
        .parse::<usize>()
        .ok()
        .filter(|&r| r > 0)
        .ok_or_else(|| {
            InputError::Parse(format!("invalid predicted rank {:?} (line {})", raw, row.line))
        })
}

/// Highest figure first; entries without a figure go last. Stable, so equal
/// figures keep table order.
fn sort_by_percentage(standings: &mut [RawPollEntry]) {
    standings.sort_by(|a, b| match (a.percentage, b.percentage) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
