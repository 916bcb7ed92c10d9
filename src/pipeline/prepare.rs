//! Normalization of raw source tables into clean CSV tables that the
//! scoring commands (or any spreadsheet) can read back directly.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::input::polls::{PERCENTAGE_COLUMNS, PollLayout, station_columns};
use crate::input::results::{VOTES_COLUMNS, parse_votes};
use crate::input::table::Table;
use crate::input::{InputBundle, parse_percentage};
use crate::names::NameNormalizer;
use crate::report::format_figure;
use crate::report::prepared::{write_pairs_csv, write_table_csv};

pub const STANDARDIZED_COLUMN: &str = "Standardized Name";
pub const RESULTS_FILE: &str = "actual_results.csv";
pub const POLLS_FILE: &str = "opinion_polls.csv";
pub const MAPPING_FILE: &str = "name_mapping.csv";

/// Raw-name columns, checked before falling back to an existing
/// standardized column.
const RAW_NAME_COLUMNS: &[&str] = &["Candidate Name", "Candidate", "Name", STANDARDIZED_COLUMN];

#[derive(Debug, Clone)]
pub struct PreparedTables {
    pub results: Table,
    pub polls: Table,
    /// (original spelling, standardized name), first-seen order.
    pub name_mapping: Vec<(String, String)>,
}

pub fn prepare_tables(bundle: &InputBundle, normalizer: &NameNormalizer) -> PreparedTables {
    let mut mapping = MappingCollector::default();

    let mut results = with_standardized_column(&bundle.results_table, normalizer, &mut mapping);
    if let Some(col) = results.column(VOTES_COLUMNS) {
        for row in &mut results.rows {
            if let Some(votes) = parse_votes(&row.cells[col]) {
                row.cells[col] = votes.to_string();
            }
        }
    }

    let mut polls = with_standardized_column(&bundle.polls_table, normalizer, &mut mapping);
    let figure_columns = match bundle.poll_layout {
        PollLayout::Wide => station_columns(&polls),
        PollLayout::Long => polls.column(PERCENTAGE_COLUMNS).into_iter().collect(),
    };
    for row in &mut polls.rows {
        for &col in &figure_columns {
            row.cells[col] = parse_percentage(&row.cells[col])
                .map(format_figure)
                .unwrap_or_default();
        }
    }

    PreparedTables {
        results,
        polls,
        name_mapping: mapping.pairs,
    }
}

pub fn write_prepared(prepared: &PreparedTables, out_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(out_dir)?;
    write_table_csv(&prepared.results, &out_dir.join(RESULTS_FILE))?;
    write_table_csv(&prepared.polls, &out_dir.join(POLLS_FILE))?;
    write_pairs_csv(
        ["Original Name", STANDARDIZED_COLUMN],
        &prepared.name_mapping,
        &out_dir.join(MAPPING_FILE),
    )?;
    tracing::info!(
        "prepared {} result rows, {} poll rows and {} name mappings in {}",
        prepared.results.rows.len(),
        prepared.polls.rows.len(),
        prepared.name_mapping.len(),
        out_dir.display()
    );
    Ok(())
}

#[derive(Default)]
struct MappingCollector {
    seen: BTreeSet<(String, String)>,
    pairs: Vec<(String, String)>,
}

impl MappingCollector {
    fn record(&mut self, raw: &str, id: &str) {
        let pair = (raw.to_string(), id.to_string());
        if self.seen.insert(pair.clone()) {
            self.pairs.push(pair);
        }
    }
}

/// Copies `table` and fills a standardized-name column (appended when
/// absent) from the raw candidate column.
fn with_standardized_column(
    table: &Table,
    normalizer: &NameNormalizer,
    mapping: &mut MappingCollector,
) -> Table {
    let mut out = table.clone();
    let Some(raw_col) = out.column(RAW_NAME_COLUMNS) else {
        return out;
    };
    let std_col = match out.column(&[STANDARDIZED_COLUMN]) {
        Some(idx) => idx,
        None => {
            out.headers.push(STANDARDIZED_COLUMN.to_string());
            for row in &mut out.rows {
                row.cells.push(String::new());
            }
            out.headers.len() - 1
        }
    };
    for row in &mut out.rows {
        let raw = row.cells[raw_col].trim().to_string();
        if raw.is_empty() {
            continue;
        }
        let resolved = normalizer.resolve(&raw);
        if !resolved.via.is_mapped() {
            tracing::warn!("unmapped name {raw:?}; written unchanged");
        }
        mapping.record(&raw, &resolved.id);
        row.cells[std_col] = resolved.id;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/prepare.rs"]
mod tests;
