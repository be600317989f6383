use super::{attach_matrix, check_job};
use crate::reports;
use changeover::config::Config;
use changeover::job::Job;
use changeover::{ChangeoverError, CoResult, OptimizationResult, OptimizeOptions};
use clap::Args;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Job files (JSON)
    #[arg(required = true)]
    pub jobs: Vec<PathBuf>,

    #[command(flatten)]
    pub config: Config,

    /// Matrix CSV (`attribute,from,to,minutes`); implies --use-matrix
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    /// Write the result as JSON (an array when several jobs are given)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail on configuration mismatches instead of warning
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Sequence rows to print per job (0 = all)
    #[arg(long, default_value_t = 25)]
    pub rows: usize,
}

struct JobRun {
    name: String,
    result: CoResult<OptimizationResult>,
}

pub fn run(args: OptimizeArgs) -> CoResult<()> {
    let base = OptimizeOptions::from(&args.config);
    info!(
        "Optimizing {} job(s), objective {}",
        args.jobs.len(),
        base.objective
    );
    let start = Instant::now();

    // Jobs are independent; each gets its own cost model.
    let runs: Vec<JobRun> = args
        .jobs
        .par_iter()
        .map(|path| {
            let name = path.display().to_string();
            let result = optimize_one(path, &args, base.clone());
            JobRun { name, result }
        })
        .collect();

    info!("Finished in {:.2?}", start.elapsed());

    for run in &runs {
        match &run.result {
            Ok(result) => {
                reports::print_sequence(&run.name, result, args.rows);
                reports::print_attribute_stats(result);
                reports::print_totals(result);
            }
            Err(e) => error!("{}: {}", run.name, e),
        }
    }

    if runs.len() > 1 {
        let rows: Vec<(String, Option<&OptimizationResult>)> = runs
            .iter()
            .map(|r| (r.name.clone(), r.result.as_ref().ok()))
            .collect();
        reports::print_batch_summary(&rows);
    }

    let failed = runs.iter().filter(|r| r.result.is_err()).count();

    if let Some(out) = &args.output {
        let results: Vec<&OptimizationResult> =
            runs.iter().filter_map(|r| r.result.as_ref().ok()).collect();
        let json = if args.jobs.len() == 1 {
            match results.first() {
                Some(r) => serde_json::to_string_pretty(r)?,
                None => String::new(),
            }
        } else {
            serde_json::to_string_pretty(&results)?
        };
        if !json.is_empty() {
            fs::write(out, json)?;
            info!("Wrote {}", out.display());
        }
    }

    if failed > 0 {
        return Err(ChangeoverError::Validation(format!(
            "{} of {} job(s) failed",
            failed,
            runs.len()
        )));
    }
    Ok(())
}

fn optimize_one(
    path: &Path,
    args: &OptimizeArgs,
    base: OptimizeOptions,
) -> CoResult<OptimizationResult> {
    let job = Job::load_from_file(path)?;
    check_job(&job, args.strict)?;
    let options = attach_matrix(&job, args.matrix.as_deref(), base)?;
    Ok(changeover::optimize(&job.orders, &job.attributes, &options))
}
