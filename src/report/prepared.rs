use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::input::table::Table;

pub fn write_table_csv(table: &Table, path: &Path) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(BufWriter::new(File::create(path)?));
    w.write_record(&table.headers)?;
    for row in &table.rows {
        w.write_record(&row.cells)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_pairs_csv(
    headers: [&str; 2],
    pairs: &[(String, String)],
    path: &Path,
) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(BufWriter::new(File::create(path)?));
    w.write_record(headers)?;
    for (a, b) in pairs {
        w.write_record([a, b])?;
    }
    w.flush()?;
    Ok(())
}
