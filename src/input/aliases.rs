use crate::input::InputError;
use crate::input::table::Table;

pub const ALIAS_COLUMNS: &[&str] = &["Alias", "Original Name", "Raw Name"];
pub const CANONICAL_COLUMNS: &[&str] = &["Canonical", "Standardized Name", "Canonical Name"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPair {
    pub line: usize,
    pub alias: String,
    pub canonical: String,
}

pub fn parse_aliases(table: &Table) -> Result<Vec<AliasPair>, InputError> {
    let alias_col = table.column(ALIAS_COLUMNS).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "alias table has no alias column (expected one of: {})",
            ALIAS_COLUMNS.join(", ")
        ))
    })?;
    let canonical_col = table.column(CANONICAL_COLUMNS).ok_or_else(|| {
        InputError::InvalidInput(format!(
            "alias table has no canonical column (expected one of: {})",
            CANONICAL_COLUMNS.join(", ")
        ))
    })?;

    let mut pairs = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let alias = table.cell(row, alias_col).trim();
        let canonical = table.cell(row, canonical_col).trim();
        if alias.is_empty() || canonical.is_empty() {
            tracing::warn!("alias row has an empty field; skipping (line {})", row.line);
            continue;
        }
        pairs.push(AliasPair {
            line: row.line,
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        });
    }
    Ok(pairs)
}
