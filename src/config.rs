use crate::error::{ChangeoverError, CoResult};
use crate::optimizer::Objective;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Refinement pass cap (default: one pass per order)
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// auto | downtime | work_time
    #[arg(long, default_value = "auto")]
    pub objective: Objective,

    /// Let matrix entries override flat changeover times
    #[arg(long, default_value_t = false)]
    pub use_matrix: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_passes: None,
            objective: Objective::Auto,
            use_matrix: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CoResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChangeoverError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SearchParams {
    /// Copies over only the values the user typed on the command line, so a
    /// config file supplies the defaults and flags still win.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(max_passes, "max_passes");
        update_if_present!(objective, "objective");
        update_if_present!(use_matrix, "use_matrix");
    }
}
