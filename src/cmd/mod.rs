pub mod evaluate;
pub mod generate;
pub mod optimize;

use changeover::cost::source::{CsvMatrixSource, MatrixSource, PrefetchRequest};
use changeover::cost::MatrixLookup;
use changeover::job::Job;
use changeover::{CoResult, OptimizeOptions};
use std::path::Path;
use tracing::{info, warn};

/// Combines the job's inline matrix with whatever the CSV file has for the
/// job's observed values. CSV entries win on conflict.
pub fn attach_matrix(
    job: &Job,
    matrix_csv: Option<&Path>,
    mut options: OptimizeOptions,
) -> CoResult<OptimizeOptions> {
    let request = PrefetchRequest::from_orders(&job.orders, &job.attributes);

    let mut matrix = match &job.matrix {
        Some(inline) => inline.prefetch(&request)?,
        None => MatrixLookup::new(),
    };

    if let Some(path) = matrix_csv {
        matrix.merge(CsvMatrixSource::new(path).prefetch(&request)?);
        options.use_matrix_lookup = true;
    }

    if options.use_matrix_lookup && matrix.is_empty() {
        warn!(
            "{}: matrix lookup enabled but no entries apply; using flat times",
            job.display_name()
        );
    } else if !matrix.is_empty() {
        info!(
            "{}: {} matrix entries available",
            job.display_name(),
            matrix.len()
        );
    }

    options.matrix = Some(matrix);
    Ok(options)
}

/// Logs every boundary issue and, in strict mode, turns them into an error.
pub fn check_job(job: &Job, strict: bool) -> CoResult<()> {
    let report = job.validate();
    for msg in report.messages() {
        warn!("{}: {}", job.display_name(), msg);
    }
    if strict {
        report.into_result()?;
    }
    Ok(())
}
