use super::matrix::MatrixLookup;
use crate::error::{ChangeoverError, CoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reads matrix data as CSV: `attribute,from,to,minutes` with a header row.
///
/// Rows with fewer than four fields or an unparsable minutes value are
/// skipped and counted. Fields are trimmed; value comparison stays
/// case-sensitive.
pub fn load_matrix<R: Read>(reader: R) -> CoResult<MatrixLookup> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut matrix = MatrixLookup::new();
    let mut skipped = 0usize;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] CSV parse error: {}", row_idx + 1, e);
                skipped += 1;
                continue;
            }
        };

        if rec.len() < 4 || rec[0].is_empty() {
            skipped += 1;
            continue;
        }

        let minutes: f64 = match rec[3].parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        matrix.insert(&rec[0], &rec[1], &rec[2], minutes);
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows in matrix data", skipped);
    }
    debug!("Loaded {} matrix entries", matrix.len());

    Ok(matrix)
}

pub fn load_matrix_file<P: AsRef<Path>>(path: P) -> CoResult<MatrixLookup> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ChangeoverError::Config(format!(
            "Could not open matrix file at '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_matrix(file)
}
