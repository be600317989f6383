use changeover::synth::{generate_job, SynthSpec};
use changeover::CoResult;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Destination job file
    pub out: PathBuf,

    #[arg(long, default_value_t = 50)]
    pub orders: usize,

    #[arg(long, default_value_t = 3)]
    pub attributes: usize,

    /// Distinct values per attribute
    #[arg(long, default_value_t = 4)]
    pub values: usize,

    /// Parallel groups to deal attributes into (0 = none)
    #[arg(long, default_value_t = 0)]
    pub groups: usize,

    /// Share of value pairs that get a matrix entry (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0)]
    pub matrix_density: f64,

    #[arg(short = 'S', long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(args: GenerateArgs) -> CoResult<()> {
    let spec = SynthSpec {
        orders: args.orders,
        attributes: args.attributes,
        values_per_attribute: args.values,
        groups: args.groups,
        matrix_density: args.matrix_density.clamp(0.0, 1.0),
        seed: args.seed,
    };
    let job = generate_job(&spec);
    job.save_to_file(&args.out)?;
    info!(
        "Wrote {} orders x {} attributes to {}",
        job.orders.len(),
        job.attributes.len(),
        args.out.display()
    );
    println!("{}", args.out.display());
    Ok(())
}
