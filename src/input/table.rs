use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Markdown,
    Csv,
    Tsv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 1-based line (markdown) or record (csv) number in the source file.
    pub line: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Index of the first header matching any of `names`, case-insensitively.
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        for name in names {
            if let Some(idx) = self
                .headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
            {
                return Some(idx);
            }
        }
        None
    }

    pub fn cell<'a>(&self, row: &'a TableRow, idx: usize) -> &'a str {
        row.cells.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn detect_format(path: &Path) -> Result<TableFormat, InputError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".md") || name.ends_with(".markdown") {
        Ok(TableFormat::Markdown)
    } else if name.ends_with(".csv") {
        Ok(TableFormat::Csv)
    } else if name.ends_with(".tsv") {
        Ok(TableFormat::Tsv)
    } else {
        Err(InputError::InvalidInput(format!(
            "unsupported table format for {} (use .md, .csv or .tsv, optionally .gz)",
            path.display()
        )))
    }
}

pub fn read_table(path: &Path) -> Result<Table, InputError> {
    let format = detect_format(path)?;
    let reader = open_maybe_gz(path)?;
    let table = match format {
        TableFormat::Markdown => parse_markdown_table(reader)?,
        TableFormat::Csv => parse_delimited(reader, b',')?,
        TableFormat::Tsv => parse_delimited(reader, b'\t')?,
    };
    tracing::debug!(
        "read table {}: {} columns, {} rows",
        path.display(),
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

/// Parses the first pipe table found in `reader`. Lines without a `|` are
/// ignored, so surrounding prose and blank lines are tolerated.
pub fn parse_markdown_table(mut reader: impl BufRead) -> Result<Table, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;
    let mut headers: Option<Vec<String>> = None;
    let mut separator_seen = false;
    let mut rows = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim();
        if !line.contains('|') {
            continue;
        }
        let cells = split_pipe_row(line);

        if headers.is_none() {
            headers = Some(
                cells
                    .iter()
                    .map(|c| c.replace("<br>", " ").trim().to_string())
                    .collect(),
            );
            continue;
        }
        let header_len = headers.as_ref().map(Vec::len).unwrap_or(0);

        if !separator_seen {
            if !is_separator_row(&cells) {
                return Err(InputError::Parse(format!(
                    "markdown table header is not followed by a separator row (line {})",
                    line_no
                )));
            }
            separator_seen = true;
            continue;
        }

        let mut cells = cells;
        if cells.len() > header_len {
            tracing::warn!(
                "markdown row has {} cells but header has {}; extra cells dropped (line {})",
                cells.len(),
                header_len,
                line_no
            );
        }
        cells.resize(header_len, String::new());
        rows.push(TableRow {
            line: line_no,
            cells,
        });
    }

    let headers =
        headers.ok_or_else(|| InputError::Parse("no markdown table found".to_string()))?;
    if !separator_seen {
        return Err(InputError::Parse(
            "markdown table has a header but no separator row".to_string(),
        ));
    }
    Ok(Table { headers, rows })
}

fn split_pipe_row(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|c| {
            !c.is_empty() && c.contains('-') && c.chars().all(|ch| matches!(ch, '-' | ':' | ' '))
        })
}

pub fn parse_delimited(reader: impl BufRead, delimiter: u8) -> Result<Table, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(InputError::Parse("table header is empty".to_string()));
    }

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        cells.resize(headers.len(), String::new());
        rows.push(TableRow {
            // header is record 1
            line: idx + 2,
            cells,
        });
    }

    Ok(Table { headers, rows })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
