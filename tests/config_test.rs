use changeover::config::{Config, SearchParams};
use changeover::{Objective, OptimizeOptions};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(
        std::iter::once("test").chain(args.iter().copied()),
    );
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

fn file_params() -> SearchParams {
    SearchParams {
        max_passes: Some(7),
        objective: Objective::WorkTime,
        use_matrix: true,
    }
}

#[test]
fn test_cli_defaults() {
    let (cli, _) = parse(&[]);
    assert_eq!(cli.config.search.max_passes, None);
    assert_eq!(cli.config.search.objective, Objective::Auto);
    assert!(!cli.config.search.use_matrix);
}

#[test]
fn test_defaults_do_not_override_file_values() {
    let (cli, matches) = parse(&[]);
    let mut params = file_params();
    params.merge_from_cli(&cli.config.search, &matches);

    assert_eq!(params.max_passes, Some(7));
    assert_eq!(params.objective, Objective::WorkTime);
    assert!(params.use_matrix);
}

#[test]
fn test_explicit_flags_win() {
    let (cli, matches) = parse(&["--max-passes", "3", "--objective", "downtime"]);
    let mut params = file_params();
    params.merge_from_cli(&cli.config.search, &matches);

    assert_eq!(params.max_passes, Some(3));
    assert_eq!(params.objective, Objective::Downtime);
    assert!(params.use_matrix);
}

#[test]
fn test_unknown_objective_is_rejected() {
    let result = TestCli::command().try_get_matches_from(["test", "--objective", "fastest"]);
    assert!(result.is_err());
}

#[test]
fn test_config_file_fills_missing_fields() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "search": {{ "objective": "work_time" }} }}"#).unwrap();

    let cfg = Config::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.search.objective, Objective::WorkTime);
    assert_eq!(cfg.search.max_passes, None);
    assert!(!cfg.search.use_matrix);
}

#[test]
fn test_options_from_config() {
    let cfg = Config {
        search: file_params(),
    };
    let opts = OptimizeOptions::from(&cfg);
    assert!(opts.use_matrix_lookup);
    assert!(opts.matrix.is_none());
    assert_eq!(opts.max_passes, Some(7));
    assert_eq!(opts.objective, Objective::WorkTime);
    assert_eq!(opts.pass_cap(100), 7);

    let default = OptimizeOptions::default();
    assert_eq!(default.pass_cap(12), 12);
    assert_eq!(default.pass_cap(0), 1);
}
