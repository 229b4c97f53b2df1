use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};

use super::model::Record;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a comma-delimited file with a header row into ordered records.
///
/// Header names are trimmed; values are returned untouched. Rows shorter than
/// the header simply lack the trailing columns.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    parse_records(file)
}

/// Parse records from any reader. Split out so the format can be exercised
/// without touching the filesystem.
pub fn parse_records<R: Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(record);
    }

    log::debug!("Parsed {} records with columns {headers:?}", records.len());
    Ok(records)
}
