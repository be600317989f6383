use changeover::config::Config;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with search defaults; explicit flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reorder one or more jobs to cut changeover time
    Optimize(cmd::optimize::OptimizeArgs),
    /// Report changeover statistics for a job's order as given
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Write a reproducible synthetic job file
    Generate(cmd::generate::GenerateArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults when merging the config file.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let file_config = match cli.config.as_deref().map(load_config).transpose() {
        Ok(cfg) => cfg,
        Err(e) => fail(e),
    };

    let outcome = match cli.command {
        Commands::Optimize(mut args) => {
            if let (Some(cfg), Some(sub)) = (file_config, matches.subcommand_matches("optimize")) {
                args.config = merge_config(cfg, &args.config, sub);
            }
            cmd::optimize::run(args)
        }
        Commands::Evaluate(mut args) => {
            if let (Some(cfg), Some(sub)) = (file_config, matches.subcommand_matches("evaluate")) {
                args.apply_config(&cfg, sub);
            }
            cmd::evaluate::run(args)
        }
        Commands::Generate(args) => cmd::generate::run(args),
    };

    if let Err(e) = outcome {
        fail(e);
    }
}

fn load_config(path: &str) -> changeover::CoResult<Config> {
    info!("Loading config from {}", path);
    Config::load_from_file(path)
}

/// The file supplies defaults; flags typed on the command line win.
fn merge_config(mut file_config: Config, cli_config: &Config, sub_matches: &ArgMatches) -> Config {
    file_config
        .search
        .merge_from_cli(&cli_config.search, sub_matches);
    file_config
}

fn fail(e: changeover::ChangeoverError) -> ! {
    eprintln!("error: {}", e);
    process::exit(1);
}
