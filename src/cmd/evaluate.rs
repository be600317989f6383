use super::{attach_matrix, check_job};
use crate::reports;
use changeover::job::Job;
use changeover::{CoResult, OptimizeOptions};
use changeover::config::Config;
use clap::parser::ValueSource;
use clap::{ArgMatches, Args};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    pub job: PathBuf,

    /// Matrix CSV; implies --use-matrix
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub use_matrix: bool,

    #[arg(long, default_value_t = 0)]
    pub rows: usize,
}

impl EvaluateArgs {
    /// Takes `use_matrix` from a config file unless it was given as a flag.
    pub fn apply_config(&mut self, config: &Config, matches: &ArgMatches) {
        if matches.value_source("use_matrix") != Some(ValueSource::CommandLine) {
            self.use_matrix = config.search.use_matrix;
        }
    }
}

pub fn run(args: EvaluateArgs) -> CoResult<()> {
    let job = Job::load_from_file(&args.job)?;
    check_job(&job, false)?;

    let base = OptimizeOptions {
        use_matrix_lookup: args.use_matrix,
        ..Default::default()
    };
    let options = attach_matrix(&job, args.matrix.as_deref(), base)?;
    let result = changeover::evaluate(&job.orders, &job.attributes, &options);

    reports::print_sequence(job.display_name(), &result, args.rows);
    reports::print_attribute_stats(&result);
    println!(
        "Work: {:.2}  Downtime: {:.2}",
        result.total_after, result.total_downtime_after
    );
    Ok(())
}
