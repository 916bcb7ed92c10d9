use crate::input::InputError;
use crate::input::table::Table;

pub const CANDIDATE_COLUMNS: &[&str] = &["Standardized Name", "Candidate Name", "Candidate", "Name"];
pub const VOTES_COLUMNS: &[&str] = &["Number of Votes", "Votes"];
pub const RANK_COLUMNS: &[&str] = &["Rank"];

#[derive(Debug, Clone, PartialEq)]
pub struct RawResultRow {
    pub line: usize,
    pub name: String,
    pub votes: Option<u64>,
    pub rank: Option<usize>,
}

/// Reads the actual-results table and returns its rows in finishing order:
/// by votes when a votes column exists, else by rank, else as listed.
pub fn parse_results(table: &Table) -> Result<Vec<RawResultRow>, InputError> {
    let name_col = table.column(CANDIDATE_COLUMNS).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "results table has no candidate column (expected one of: {})",
            CANDIDATE_COLUMNS.join(", ")
        ))
    })?;
    let votes_col = table.column(VOTES_COLUMNS);
    let rank_col = table.column(RANK_COLUMNS);

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let name = table.cell(row, name_col).trim();
        if name.is_empty() {
            tracing::warn!(
                "results row has an empty candidate name; skipping (line {})",
                row.line
            );
            continue;
        }
        let votes = match votes_col {
            Some(idx) => Some(parse_votes(table.cell(row, idx)).ok_or_else(|| {
                InputError::Parse(format!(
                    "invalid vote count {:?} (line {})",
                    table.cell(row, idx),
                    row.line
                ))
            })?),
            None => None,
        };
        let rank = match rank_col {
            Some(idx) => parse_rank(table.cell(row, idx)),
            None => None,
        };
        rows.push(RawResultRow {
            line: row.line,
            name: name.to_string(),
            votes,
            rank,
        });
    }

    if rows.is_empty() {
        return Err(InputError::Parse("results table has no candidates".to_string()));
    }

    if votes_col.is_some() {
        rows.sort_by(|a, b| b.votes.cmp(&a.votes));
    } else if rank_col.is_some() {
        rows.sort_by(|a, b| match (a.rank, b.rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    Ok(rows)
}

/// Vote counts may carry thousands separators: `27,121,073`.
pub fn parse_votes(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u64>().ok()
}

fn parse_rank(raw: &str) -> Option<usize> {
    raw.trim()
        .trim_end_matches('.')
        .parse::<usize>()
        .ok()
        .filter(|&r| r > 0)
}
